//! HTTP Range parsing (RFC 7233, single range, bytes unit)
//!
//! Download clients resume interrupted font transfers with `Range` headers.
//! Multi-range requests and non-bytes units are ignored rather than
//! rejected, matching the permissive behavior of mainstream file servers.

/// Resolved byte range with inclusive bounds, clamped to the file size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Length in bytes (test validation)
    #[cfg(test)]
    pub const fn byte_len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Outcome of resolving a Range header against a concrete file size
#[derive(Debug, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No Range header, or one we ignore; serve the whole file
    Full,
    /// Satisfiable single range; serve 206
    Partial(ByteRange),
    /// Syntactically valid but unsatisfiable; serve 416
    Unsatisfiable,
}

/// Resolve a Range header value against the file size.
///
/// Supported forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
pub fn resolve_range(header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(spec) = header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };

    // Single range only
    if spec.contains(',') || file_size == 0 {
        return RangeOutcome::Full;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    // Suffix form: "-500" means the last 500 bytes
    if start_str.is_empty() {
        let Ok(suffix) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        if suffix == 0 {
            return RangeOutcome::Unsatisfiable;
        }
        return RangeOutcome::Partial(ByteRange {
            start: file_size.saturating_sub(suffix),
            end: file_size - 1,
        });
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        let Ok(end) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        if end < start {
            return RangeOutcome::Unsatisfiable;
        }
        end.min(file_size - 1)
    };

    RangeOutcome::Partial(ByteRange { start, end })
}
