//! Log sanitization for borrower PII.
//!
//! Loan applications travel with identifiers that must never land in log
//! files: social security numbers, card and account numbers, contact
//! details and application IDs. [`SanitizingMakeWriter`] wraps any
//! `tracing_subscriber` writer and rewrites each formatted line before it
//! reaches the sink.
//!
//! Structured fields are the first line of defense (the scoring service
//! never logs raw feature values); this filter catches what slips through.
//!
//! Input size per call is capped by `LENDSCORE_SANITIZE_MAX_BYTES`
//! (default 16 KiB).

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

const DEFAULT_MAX_BYTES: usize = 16 * 1024;

/// Pattern and replacement pairs, applied in order.
///
/// Card numbers run before phone numbers so a 16-digit PAN is not partially
/// consumed as a phone number. Both capture the preceding character and put
/// it back, so digit runs after a decimal point (float fields) are kept.
const RULES: &[(&str, &str)] = &[
    (
        r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
        "[REDACTED-ID]",
    ),
    (r"\b\d{3}-\d{2}-\d{4}\b", "[REDACTED-SSN]"),
    (r"(^|[^.\w])(?:\d[ -]?){12,18}\d\b", "${1}[REDACTED-CARD]"),
    (
        r"(?i)\b(?:account|acct|routing|iban)(?:\s*(?:no|number|#))?\s*[:=#]?\s*[0-9A-Z]{6,34}\b",
        "[REDACTED-ACCOUNT]",
    ),
    (
        r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
        "[REDACTED-EMAIL]",
    ),
    (
        r"(^|[^.\w])(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b",
        "${1}[REDACTED-PHONE]",
    ),
    (
        r"(?i)\b(?:api[_-]?key|token|secret|password)\b\s*[:=]\s*\S{8,}",
        "[REDACTED-SECRET]",
    ),
];

struct Redactions {
    set: RegexSet,
    rules: Vec<(Regex, &'static str)>,
}

fn redactions() -> &'static Redactions {
    static REDACTIONS: OnceLock<Redactions> = OnceLock::new();
    REDACTIONS.get_or_init(|| {
        let set = RegexSet::new(RULES.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let rules = RULES
            .iter()
            .map(|(p, r)| (Regex::new(p).expect("Valid regex"), *r))
            .collect();
        Redactions { set, rules }
    })
}

fn max_bytes() -> usize {
    std::env::var("LENDSCORE_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_MAX_BYTES)
}

fn truncate(input: &str, limit: usize) -> (&str, bool) {
    if input.len() <= limit {
        return (input, false);
    }
    let mut end = limit;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Replace PII in `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_bytes())
}

fn sanitize_with_limit(input: &str, limit: usize) -> String {
    let (prefix, truncated) = truncate(input, limit);
    let redactions = redactions();

    let mut out = prefix.to_string();
    for index in redactions.set.matches(prefix).into_iter() {
        let (regex, replacement) = &redactions.rules[index];
        out = regex.replace_all(&out, *replacement).into_owned();
    }

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// Whether `input` contains anything the sanitizer would redact.
#[must_use]
pub fn contains_pii(input: &str) -> bool {
    let (prefix, _) = truncate(input, max_bytes());
    redactions().set.is_match(prefix)
}

/// `MakeWriter` that sanitizes every line written through it.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn emit(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn drain_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);

        // A formatter that never writes a newline must not grow the buffer
        // without bound.
        if self.pending.len() > max_bytes().saturating_mul(2) {
            let overflow = std::mem::take(&mut self.pending);
            self.emit(&overflow)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.drain_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.drain_lines()?;
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}
