use seance_frame::crc32;

use crate::cmd::{decode_hex_text, ChecksumArgs, Context};
use crate::exit::{io_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::print_checksum;

pub fn run(args: ChecksumArgs, ctx: Context) -> CliResult<i32> {
    let input = match (args.data, args.file, args.hex) {
        (Some(data), _, _) => data.into_bytes(),
        (None, Some(path), _) => std::fs::read(&path)
            .map_err(|err| io_error(&format!("read {}", path.display()), err))?,
        (None, None, Some(text)) => decode_hex_text(&text)
            .map_err(|err| CliError::new(DATA_INVALID, format!("invalid hex: {err}")))?,
        (None, None, None) => Vec::new(),
    };

    let crc = crc32::calculate(args.seed, &input);
    print_checksum(crc, input.len(), ctx.format);
    Ok(SUCCESS)
}
