use bytes::BytesMut;
use seance_frame::{Frame, FrameCodec};

use crate::cmd::{Context, EncodeArgs};
use crate::exit::{frame_error, io_error, CliResult, SUCCESS};
use crate::output::print_encoded;

pub fn run(args: EncodeArgs, ctx: Context) -> CliResult<i32> {
    let payload = match (args.data, args.file) {
        (Some(data), _) => data.into_bytes(),
        (None, Some(path)) => std::fs::read(&path)
            .map_err(|err| io_error(&format!("read {}", path.display()), err))?,
        (None, None) => Vec::new(),
    };

    let mut frame = Frame::new(args.opcode, args.message_id, payload).with_fin(!args.continues);
    if let Some(id) = args.response_to {
        frame = frame.with_response_to(id);
    }
    if let Some(key) = args.mask {
        frame = frame.with_mask(key);
    }

    let codec = FrameCodec::with_config(ctx.config);
    let mut wire = BytesMut::with_capacity(frame.wire_size());
    codec
        .encode_frame(&frame, &mut wire)
        .map_err(|err| frame_error("encode", err))?;

    tracing::debug!(
        opcode = frame.opcode(),
        message_id = frame.message_id(),
        wire_size = wire.len(),
        "encoded frame"
    );
    print_encoded(&frame, &wire, ctx.format);
    Ok(SUCCESS)
}
