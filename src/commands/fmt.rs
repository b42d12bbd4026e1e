use std::io::Write;

use slack_attachments::codec::{self, DecodeOptions};
use slack_attachments::error::Result;
use slack_attachments::types::Attachment;

use crate::cli::FmtArgs;
use crate::commands::read_input;

/// Encode with indentation when asked for on the command line or in config.
pub fn render(attachment: &Attachment, pretty: bool) -> Result<Vec<u8>> {
    if pretty {
        codec::encode_pretty(attachment)
    } else {
        codec::encode(attachment)
    }
}

pub fn run(args: &FmtArgs, options: DecodeOptions, pretty_by_default: bool) -> Result<()> {
    let bytes = read_input(&args.file)?;
    let attachment = codec::decode_with(&bytes, options)?;

    let pretty = args.pretty || (pretty_by_default && !args.compact);
    let mut encoded = render(&attachment, pretty)?;
    encoded.push(b'\n');

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&encoded)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_compact_and_pretty() {
        let attachment = codec::decode_str(r#"{ "text" : "" ,  "id": 1 }"#).unwrap();

        let compact = render(&attachment, false).unwrap();
        assert_eq!(compact, br#"{"id":1,"text":""}"#);

        let pretty = String::from_utf8(render(&attachment, true).unwrap()).unwrap();
        assert_eq!(pretty, "{\n  \"id\": 1,\n  \"text\": \"\"\n}");
    }
}
