use clap::{ArgGroup, Args, Subcommand};
use std::path::PathBuf;

use seance_frame::FrameConfig;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod checksum;
pub mod decode;
pub mod encode;
pub mod version;

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub format: OutputFormat,
    pub config: FrameConfig,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a single frame.
    Encode(EncodeArgs),
    /// Decode and print every frame in a byte stream.
    Decode(DecodeArgs),
    /// Compute the CRC32 of some bytes.
    Checksum(ChecksumArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, ctx: Context) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, ctx),
        Command::Decode(args) => decode::run(args, ctx),
        Command::Checksum(args) => checksum::run(args, ctx),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Frame opcode (0-255, decimal or 0x-prefixed hex).
    #[arg(long, short = 'o', value_parser = parse_u8)]
    pub opcode: u8,
    /// Message id. Ids with the high bit set are server-originated.
    #[arg(long, short = 'm', value_parser = parse_u32)]
    pub message_id: u32,
    /// Id of the message this frame answers.
    #[arg(long, value_parser = parse_u32)]
    pub response_to: Option<u32>,
    /// Mask the payload on the wire with this 32-bit key.
    #[arg(long, value_parser = parse_u32)]
    pub mask: Option<u32>,
    /// Clear FIN: more fragments of this message follow.
    #[arg(long)]
    pub continues: bool,
    /// Raw string payload.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub data: Option<String>,
    /// Read payload from file.
    #[arg(long, conflicts_with = "data")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// File holding encoded frames. Reads stdin when omitted.
    pub path: Option<PathBuf>,
    /// Treat the input as hex text instead of raw bytes.
    #[arg(long)]
    pub hex: bool,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .multiple(false)
        .args(["data", "file", "hex"])
))]
pub struct ChecksumArgs {
    /// Raw string input.
    #[arg(long)]
    pub data: Option<String>,
    /// Read input from file.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Hex-encoded input.
    #[arg(long)]
    pub hex: Option<String>,
    /// Seed for continuing a running checksum.
    #[arg(long, default_value = "0", value_parser = parse_u32)]
    pub seed: u32,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse a decimal or `0x`-prefixed hex integer.
pub fn parse_u32(raw: &str) -> Result<u32, String> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => raw.parse(),
    };
    parsed.map_err(|err| format!("invalid value '{raw}': {err}"))
}

fn parse_u8(raw: &str) -> Result<u8, String> {
    let value = parse_u32(raw)?;
    u8::try_from(value).map_err(|_| format!("opcode {value} does not fit in a byte"))
}

/// Strip whitespace and decode hex text.
pub fn decode_hex_text(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let compact: String = text.split_whitespace().collect();
    hex::decode(compact)
}
