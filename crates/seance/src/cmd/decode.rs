use std::fs::File;
use std::io::{Cursor, Read};

use seance_frame::FrameReader;

use crate::cmd::{decode_hex_text, Context, DecodeArgs};
use crate::exit::{frame_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::print_frame;

pub fn run(args: DecodeArgs, ctx: Context) -> CliResult<i32> {
    let source = match &args.path {
        Some(path) => path.display().to_string(),
        None => "stdin".to_string(),
    };
    let mut input: Box<dyn Read> = match &args.path {
        Some(path) => {
            let file = File::open(path).map_err(|err| io_error(&format!("open {source}"), err))?;
            Box::new(file)
        }
        None => Box::new(std::io::stdin().lock()),
    };

    if args.hex {
        let mut text = String::new();
        input
            .read_to_string(&mut text)
            .map_err(|err| io_error(&format!("read {source}"), err))?;
        let bytes = decode_hex_text(&text)
            .map_err(|err| CliError::new(DATA_INVALID, format!("{source}: invalid hex: {err}")))?;
        input = Box::new(Cursor::new(bytes));
    }

    let reader = FrameReader::with_config(input, ctx.config);
    let mut count = 0usize;
    for frame in reader {
        let frame =
            frame.map_err(|err| frame_error(&format!("decode {source} (frame {count})"), err))?;
        print_frame(&frame, ctx.format);
        count += 1;
    }

    tracing::debug!(frames = count, source = %source, "decode finished");
    Ok(SUCCESS)
}
