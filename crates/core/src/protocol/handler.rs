//! Callback interface invoked by the SysEx codec
//!
//! The codec owns framing, the manufacturer handshake and 7-bit packing. Once
//! a request is decoded it calls into a [`DataHandler`] with raw
//! block/section bytes and expects a result it can encode back.

use super::status::ConfigResult;

/// Maximum number of values in a custom request response
pub const CUSTOM_RESPONSE_CAPACITY: usize = 8;

/// Values returned by a custom request
pub type CustomResponse = heapless::Vec<u16, CUSTOM_RESPONSE_CAPACITY>;

/// Request callbacks for the SysEx configuration protocol
pub trait DataHandler {
    /// Read one parameter
    fn get(&mut self, block: u8, section: u8, index: usize) -> ConfigResult<i32>;

    /// Write one parameter
    fn set(&mut self, block: u8, section: u8, index: usize, value: i32) -> ConfigResult<()>;

    /// Serve a deployment-defined request
    fn custom_request(&mut self, request: u16) -> ConfigResult<CustomResponse>;

    /// Transmit an encoded response frame
    fn send_response(&mut self, bytes: &[u8]);
}
