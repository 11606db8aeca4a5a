use linkt_core::ScanResponse;

/// One decode → validate → display → reset iteration.
///
/// While a code is awaiting its result or the result is on display, every
/// other code is refused, so at most one validation is ever in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanCycle {
    last_decoded: Option<String>,
    awaiting_result: bool,
    result: Option<ScanResponse>,
}

impl ScanCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the cycle for `code`. Returns false when busy or when `code`
    /// is the value already being processed.
    pub fn offer(&mut self, code: &str) -> bool {
        if self.is_busy() || self.last_decoded.as_deref() == Some(code) {
            return false;
        }

        self.last_decoded = Some(code.to_string());
        self.awaiting_result = true;
        self.result = None;
        true
    }

    pub fn complete(&mut self, result: ScanResponse) {
        self.awaiting_result = false;
        self.result = Some(result);
    }

    /// Ready for the next code
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_busy(&self) -> bool {
        self.awaiting_result || self.result.is_some()
    }

    pub fn is_awaiting_result(&self) -> bool {
        self.awaiting_result
    }

    pub fn last_decoded(&self) -> Option<&str> {
        self.last_decoded.as_deref()
    }

    pub fn result(&self) -> Option<&ScanResponse> {
        self.result.as_ref()
    }
}
