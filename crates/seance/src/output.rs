use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use seance_frame::opcode::opcode_name;
use seance_frame::{Frame, Origin};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    opcode: u8,
    opcode_name: &'a str,
    fin: bool,
    message_id: u32,
    origin: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_to: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mask: Option<String>,
    length: u64,
    crc: String,
    payload: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    wire: Option<String>,
}

impl<'a> FrameOutput<'a> {
    fn new(frame: &'a Frame, wire: Option<&[u8]>) -> Self {
        Self {
            opcode: frame.opcode(),
            opcode_name: opcode_name(frame.opcode()),
            fin: frame.fin(),
            message_id: frame.message_id(),
            origin: origin_name(frame.origin()),
            response_to: frame.response_to(),
            mask: frame.mask().map(|key| format!("{key:08x}")),
            length: frame.length(),
            crc: format!("{:08x}", frame.crc()),
            payload: payload_preview(frame.payload()),
            wire: wire.map(hex::encode),
        }
    }
}

#[derive(Serialize)]
struct ChecksumOutput {
    crc: String,
    size: usize,
}

/// Print a decoded frame.
pub fn print_frame(frame: &Frame, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&FrameOutput::new(frame, None)),
        OutputFormat::Table => {
            let mut table = frame_table();
            table.add_row(frame_row(frame));
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{}", pretty_line(frame)),
        OutputFormat::Raw => print_raw(frame.payload()),
    }
}

/// Print a freshly encoded frame together with its wire bytes.
pub fn print_encoded(frame: &Frame, wire: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&FrameOutput::new(frame, Some(wire))),
        OutputFormat::Table => {
            let mut table = frame_table();
            table.add_row(frame_row(frame));
            println!("{table}");
            println!("{}", hex::encode(wire));
        }
        OutputFormat::Pretty => {
            println!("{}", pretty_line(frame));
            println!("{}", hex::encode(wire));
        }
        OutputFormat::Raw => print_raw(wire),
    }
}

pub fn print_checksum(crc: u32, size: usize, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&ChecksumOutput {
            crc: format!("{crc:08x}"),
            size,
        }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_header(vec!["CRC32", "SIZE"])
                .add_row(vec![format!("{crc:08x}"), size.to_string()]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{crc:08x}"),
        OutputFormat::Raw => print_raw(&crc.to_be_bytes()),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn frame_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "OPCODE", "FIN", "ID", "ORIGIN", "REPLY TO", "MASK", "SIZE", "CRC", "PAYLOAD",
        ]);
    table
}

fn frame_row(frame: &Frame) -> Vec<String> {
    vec![
        format!("{} ({})", opcode_name(frame.opcode()), frame.opcode()),
        frame.fin().to_string(),
        frame.message_id().to_string(),
        origin_name(frame.origin()).to_string(),
        frame
            .response_to()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string()),
        frame
            .mask()
            .map(|key| format!("{key:08x}"))
            .unwrap_or_else(|| "-".to_string()),
        frame.length().to_string(),
        format!("{:08x}", frame.crc()),
        payload_preview(frame.payload()),
    ]
}

fn pretty_line(frame: &Frame) -> String {
    let mut line = format!(
        "opcode={} ({}) fin={} id={} origin={}",
        frame.opcode(),
        opcode_name(frame.opcode()),
        frame.fin(),
        frame.message_id(),
        origin_name(frame.origin()),
    );
    if let Some(id) = frame.response_to() {
        line.push_str(&format!(" reply_to={id}"));
    }
    if let Some(key) = frame.mask() {
        line.push_str(&format!(" mask={key:08x}"));
    }
    line.push_str(&format!(
        " size={} crc={:08x} payload={}",
        frame.length(),
        frame.crc(),
        payload_preview(frame.payload())
    ));
    line
}

fn origin_name(origin: Origin) -> &'static str {
    match origin {
        Origin::Client => "client",
        Origin::Server => "server",
    }
}

fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", payload.len()),
    }
}
