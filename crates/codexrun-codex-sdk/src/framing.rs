//! Line framing for the Codex stdout stream.

/// Reassembles complete lines from raw byte chunks.
///
/// Codex emits newline-delimited JSON on stdout, but the chunks handed to us
/// by the pipe can split lines anywhere. The framer keeps the trailing
/// incomplete fragment across calls and emits only complete lines, in arrival
/// order. Blank lines are skipped; a fragment still buffered at EOF is
/// discarded.
#[derive(Debug, Default)]
pub struct LineFramer {
    buf: Vec<u8>,
}

impl LineFramer {
    /// Create an empty framer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning every line it completes.
    ///
    /// Lines are decoded lossily as UTF-8 and trimmed; empty results are
    /// dropped. Splitting the same stream at different chunk boundaries
    /// yields the same lines.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let rest = self.buf.split_off(pos + 1);
            let line = std::mem::replace(&mut self.buf, rest);

            let text = String::from_utf8_lossy(&line);
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chunk() {
        let mut framer = LineFramer::new();
        let lines = framer.push(b"one\ntwo\n");
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_fragment_carried_across_chunks() {
        let mut framer = LineFramer::new();
        assert!(framer.push(b"par").is_empty());
        assert!(framer.push(b"tial").is_empty());
        assert_eq!(framer.push(b" line\nnext"), vec!["partial line"]);
        assert_eq!(framer.push(b"\n"), vec!["next"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let mut framer = LineFramer::new();
        let lines = framer.push(b"a\n\n   \n\r\nb\n");
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_crlf_trimmed() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push(b"hello\r\n"), vec!["hello"]);
    }

    #[test]
    fn test_chunk_boundary_independence() {
        let stream = b"{\"a\":1}\nnoise\n{\"b\":2}\n{\"c\":\"\xe2\x9c\x93\"}\n";

        let mut all_at_once = LineFramer::new();
        let expected = all_at_once.push(stream);

        let mut byte_at_a_time = LineFramer::new();
        let mut got = Vec::new();
        for b in stream.iter() {
            got.extend(byte_at_a_time.push(std::slice::from_ref(b)));
        }
        assert_eq!(got, expected);

        let mut odd_split = LineFramer::new();
        let mut got = Vec::new();
        for chunk in stream.chunks(3) {
            got.extend(odd_split.push(chunk));
        }
        assert_eq!(got, expected);
    }

    #[test]
    fn test_unterminated_fragment_not_emitted() {
        let mut framer = LineFramer::new();
        assert!(framer.push(b"no newline here").is_empty());
    }
}
