use std::io::{BufRead, Write};

/// writes the prompt to `output` and reads a single line from `input`.
///
/// `None` means the input was closed.
pub fn prompt_line<R, W>(input: &mut R, output: &mut W, prompt: &str) -> std::io::Result<Option<String>>
where
    R: BufRead,
    W: Write
{
    output.write_all(prompt.as_bytes())?;
    output.flush()?;

    let mut buffer = String::new();

    if input.read_line(&mut buffer)? == 0 {
        Ok(None)
    } else {
        Ok(Some(buffer))
    }
}
