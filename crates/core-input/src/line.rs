use crate::{ByteSource, InputError};

/// Read one line (terminated by `\n` or `\r`) from `source`, waiting through expired waits.
///
/// Returns `Ok(None)` when the line is blank after trimming, or when the source closes before
/// a terminator arrives with nothing typed.
pub fn read_line<S: ByteSource + ?Sized>(source: &mut S) -> Result<Option<String>, InputError> {
    let mut buf = Vec::new();
    loop {
        match source.read_byte() {
            Ok(Some(b'\n' | b'\r')) => break,
            Ok(Some(b)) => buf.push(b),
            Ok(None) => continue,
            Err(InputError::Disconnected) => break,
            Err(e) => return Err(e),
        }
    }
    let line = String::from_utf8_lossy(&buf).trim().to_string();
    Ok((!line.is_empty()).then_some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedBytes;

    #[test]
    fn reads_through_timeouts() {
        let mut s = ScriptedBytes::from_bytes(b"no");
        s.push_timeout().push_bytes(b"tes.txt\nrest");
        assert_eq!(read_line(&mut s).unwrap().as_deref(), Some("notes.txt"));
        assert_eq!(s.read_byte().unwrap(), Some(b'r'));
    }

    #[test]
    fn blank_line_is_abandoned() {
        let mut s = ScriptedBytes::from_bytes(b"   \r");
        assert_eq!(read_line(&mut s).unwrap(), None);
    }

    #[test]
    fn closed_input_returns_partial_or_none() {
        let mut s = ScriptedBytes::from_bytes(b"a.txt");
        assert_eq!(read_line(&mut s).unwrap().as_deref(), Some("a.txt"));
        let mut empty = ScriptedBytes::new();
        assert_eq!(read_line(&mut empty).unwrap(), None);
    }
}
