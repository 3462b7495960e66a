use std::io::{self, Write};

/// Rendered command output, terminated by exactly one newline.
pub fn print_block(text: &str) -> io::Result<()> {
    emit(&mut io::stdout().lock(), text, true)
}

/// Help text, printed as given.
pub fn print_raw(text: &str) -> io::Result<()> {
    emit(&mut io::stdout().lock(), text, false)
}

/// Writing into a pipe the reader already closed (`transferencias statement |
/// head -3`) ends quietly.
fn emit<W>(writer: &mut W, text: &str, terminate: bool) -> io::Result<()>
where
    W: Write,
{
    let result = writer.write_all(text.as_bytes()).and_then(|()| {
        if terminate && !text.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        writer.flush()
    });
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
