use std::collections::HashSet;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in a board file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoardKey {
    Buttons,
    Encoders,
    Analog,
    Leds,
    EepromSize,
}

impl BoardKey {
    const ALL: [BoardKey; 5] = [
        BoardKey::Buttons,
        BoardKey::Encoders,
        BoardKey::Analog,
        BoardKey::Leds,
        BoardKey::EepromSize,
    ];

    fn parse(key: &str) -> Option<Self> {
        match key {
            "BUTTONS" => Some(BoardKey::Buttons),
            "ENCODERS" => Some(BoardKey::Encoders),
            "ANALOG" => Some(BoardKey::Analog),
            "LEDS" => Some(BoardKey::Leds),
            "EEPROM_SIZE" => Some(BoardKey::EepromSize),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            BoardKey::Buttons => "BUTTONS",
            BoardKey::Encoders => "ENCODERS",
            BoardKey::Analog => "ANALOG",
            BoardKey::Leds => "LEDS",
            BoardKey::EepromSize => "EEPROM_SIZE",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Values collected from a board file and its includes
#[derive(Debug, Clone, Default)]
struct BoardDef {
    values: [Option<usize>; 5],
}

impl BoardDef {
    fn get(&self, key: BoardKey) -> Option<usize> {
        self.values[key.index()]
    }

    /// Take every value of `included` that is not already set
    fn merge_defaults(&mut self, included: &BoardDef) {
        for key in BoardKey::ALL {
            if self.get(key).is_none() {
                self.values[key.index()] = included.get(key);
            }
        }
    }
}

/// Parse a board file with include support
fn parse_board(path: &Path) -> Result<BoardDef, String> {
    let mut include_chain = HashSet::new();
    parse_board_with_includes(path, &mut include_chain)
}

/// Internal parser with include recursion tracking
fn parse_board_with_includes(
    path: &Path,
    include_chain: &mut HashSet<PathBuf>,
) -> Result<BoardDef, String> {
    let canonical_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    if !include_chain.insert(canonical_path.clone()) {
        return Err(format!(
            "Circular include detected at {}",
            canonical_path.display()
        ));
    }

    // Included files must trigger a rebuild too
    println!("cargo:rerun-if-changed={}", path.display());

    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read board file {}: {}", path.display(), e))?;

    let mut board = BoardDef::default();
    // Keys set by this file, as opposed to inherited from includes
    let mut local = [false; 5];

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1;

        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        if parts.len() != 2 {
            return Err(format!(
                "{}:{}: expected 'KEY VALUE', got '{}'",
                path.display(),
                line_num,
                line.trim()
            ));
        }

        let (key, value) = (parts[0], parts[1]);

        if key == "include" {
            let include_path = match path.parent() {
                Some(parent) => parent.join(value),
                None => PathBuf::from(value),
            };
            let included = parse_board_with_includes(&include_path, include_chain)?;
            board.merge_defaults(&included);
            continue;
        }

        let key = BoardKey::parse(key).ok_or_else(|| {
            format!("{}:{}: unknown key '{}'", path.display(), line_num, key)
        })?;

        if local[key.index()] {
            return Err(format!(
                "{}:{}: {} defined twice",
                path.display(),
                line_num,
                key.name()
            ));
        }

        let value: usize = value.parse().map_err(|_| {
            format!(
                "{}:{}: {} must be a non-negative integer, got '{}'",
                path.display(),
                line_num,
                key.name(),
                value
            )
        })?;

        local[key.index()] = true;
        board.values[key.index()] = Some(value);
    }

    include_chain.remove(&canonical_path);
    Ok(board)
}

/// Fully validated board definition
#[derive(Debug, Clone, Copy)]
struct BoardConfig {
    buttons: usize,
    encoders: usize,
    analog: usize,
    leds: usize,
    eeprom_size: usize,
}

fn validate_board(board: &BoardDef, path: &Path) -> Result<BoardConfig, String> {
    let require = |key: BoardKey| {
        board.get(key).ok_or_else(|| {
            format!("{}: missing required key {}", path.display(), key.name())
        })
    };

    let config = BoardConfig {
        buttons: require(BoardKey::Buttons)?,
        encoders: require(BoardKey::Encoders)?,
        analog: require(BoardKey::Analog)?,
        leds: require(BoardKey::Leds)?,
        eeprom_size: require(BoardKey::EepromSize)?,
    };

    if config.leds % 3 != 0 {
        return Err(format!(
            "{}: LEDS must be a multiple of 3 (RGB groups), got {}",
            path.display(),
            config.leds
        ));
    }

    if config.eeprom_size == 0 {
        return Err(format!("{}: EEPROM_SIZE must not be zero", path.display()));
    }

    Ok(config)
}

/// Generate Rust code from the board definition
fn generate_board_config(name: &str, config: &BoardConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "// Auto-generated from boards/{}.board - DO NOT EDIT\n",
        name
    ));
    output.push_str("// This file is included in board.rs, so types are already in scope\n\n");

    output.push_str(&format!("pub const BOARD_NAME: &str = \"{}\";\n\n", name));
    output.push_str("pub const BOARD_CONFIG: BoardConfig = BoardConfig {\n");
    output.push_str(&format!("    buttons: {},\n", config.buttons));
    output.push_str(&format!("    encoders: {},\n", config.encoders));
    output.push_str(&format!("    analog: {},\n", config.analog));
    output.push_str(&format!("    leds: {},\n", config.leds));
    output.push_str("};\n\n");
    output.push_str(&format!(
        "pub const EEPROM_SIZE: usize = {};\n",
        config.eeprom_size
    ));

    output
}

fn main() {
    // boards directory is at workspace root (../../boards from crates/firmware)
    let board_name = env::var("BOARD").unwrap_or_else(|_| "standard".to_string());
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let workspace_root = PathBuf::from(&manifest_dir)
        .parent()
        .and_then(Path::parent)
        .expect("firmware crate lives two levels below the workspace root")
        .to_path_buf();
    let board_path = workspace_root
        .join("boards")
        .join(format!("{}.board", board_name));

    println!("cargo:rerun-if-changed={}", board_path.display());
    println!("cargo:rerun-if-env-changed=BOARD");

    let board = match parse_board(&board_path) {
        Ok(board) => board,
        Err(e) => panic!("Failed to parse board file: {}", e),
    };

    let config = match validate_board(&board, &board_path) {
        Ok(config) => config,
        Err(e) => panic!("Board validation failed: {}", e),
    };

    let generated_code = generate_board_config(&board_name, &config);

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let config_path = PathBuf::from(&out_dir).join("board_config.rs");
    let mut file = fs::File::create(&config_path).expect("Failed to create board_config.rs");
    file.write_all(generated_code.as_bytes())
        .expect("Failed to write board_config.rs");
}
