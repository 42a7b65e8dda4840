use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use pio_rs::Program;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Annotated listing
    Text,
    Json,
    /// One hex word per line
    Hex,
    /// Raw little-endian image
    Bin,
}

#[derive(Debug, Serialize)]
struct ProgramOut<'a> {
    name: &'a str,
    program: &'a Program,
}

pub fn render(name: &str, program: &Program, format: OutputFormat) -> Result<Vec<u8>> {
    let bytes = match format {
        OutputFormat::Text => format!("; {name}\n{program}").into_bytes(),
        OutputFormat::Json => {
            let mut v = serde_json::to_vec_pretty(&ProgramOut { name, program })?;
            v.push(b'\n');
            v
        }
        OutputFormat::Hex => program.words().iter().map(|w| format!("{w:04x}\n")).collect::<String>().into_bytes(),
        OutputFormat::Bin => program.to_le_bytes(),
    };
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pio_rs::programs;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_and_bin_follow_word_order() {
        let p = programs::ws2812().unwrap();
        let hex = render("ws2812", &p, OutputFormat::Hex).unwrap();
        assert_eq!(String::from_utf8(hex).unwrap(), "6221\n1123\n1400\na442\n");
        let bin = render("ws2812", &p, OutputFormat::Bin).unwrap();
        assert_eq!(bin, vec![0x21, 0x62, 0x23, 0x11, 0x00, 0x14, 0x42, 0xa4]);
    }

    #[test]
    fn json_carries_metadata() {
        let p = programs::i2c().unwrap();
        let json = render("i2c", &p, OutputFormat::Json).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(v["name"], "i2c");
        assert_eq!(v["program"]["wrap_target"], 12);
        assert_eq!(v["program"]["wrap"], 17);
        assert_eq!(v["program"]["side_set"]["optional"], true);
        assert_eq!(v["program"]["side_set"]["pindirs"], true);
        assert_eq!(v["program"]["symbols"]["entry_point"], 12);
        assert_eq!(v["program"]["code"].as_array().unwrap().len(), 18);
    }

    #[test]
    fn text_listing_marks_wrap_window() {
        let p = programs::blink().unwrap();
        let text = String::from_utf8(render("blink", &p, OutputFormat::Text).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "; blink");
        assert_eq!(lines[3], ".wrap_target");
        assert!(text.contains("lp1:\n     4: 0x0044 ; jmp\n"));
        assert_eq!(*lines.last().unwrap(), ".wrap");
    }
}
