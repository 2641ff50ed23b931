use rustyline::DefaultEditor;

use crate::args::parse_amount;

pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<String>;
}

impl LineReader for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<String> {
        Ok(self.readline(prompt)?)
    }
}

pub fn prompt_address(reader: &mut impl LineReader) -> anyhow::Result<String> {
    Ok(reader
        .read_line("Enter your Lightning Address: ")?
        .trim()
        .to_string())
}

/// Asks until the answer is a non-negative integer.
pub fn prompt_amount(reader: &mut impl LineReader) -> anyhow::Result<u64> {
    loop {
        let line = reader.read_line("Enter amount (integer): ")?;
        if let Some(amount) = parse_amount(line.trim()) {
            return Ok(amount);
        }
        println!("Amount must be a non-negative integer.");
    }
}

/// An empty answer means no comment.
pub fn prompt_comment(reader: &mut impl LineReader) -> anyhow::Result<Option<String>> {
    let line = reader.read_line(
        "Enter a comment (optional, max length enforced by receiver, press Enter to skip): ",
    )?;
    let comment = line.trim();
    Ok((!comment.is_empty()).then(|| comment.to_string()))
}
