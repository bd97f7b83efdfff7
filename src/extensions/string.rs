pub trait ToDashSeparators {
    /// Returns a copy with all `/` replaced by `-` and leading/trailing
    /// whitespace trimmed.
    fn to_dash_separators(&self) -> String;
}

impl ToDashSeparators for str {
    fn to_dash_separators(&self) -> String {
        self.trim().replace('/', "-")
    }
}

impl ToDashSeparators for String {
    fn to_dash_separators(&self) -> String {
        self.as_str().to_dash_separators()
    }
}

pub trait StripQuotes {
    /// Trimmed text with one pair of matching `'` or `"` quotes removed.
    fn strip_quotes(&self) -> &str;
}

impl StripQuotes for str {
    fn strip_quotes(&self) -> &str {
        let t = self.trim();
        for q in ['"', '\''] {
            if let Some(inner) = t.strip_prefix(q).and_then(|rest| rest.strip_suffix(q)) {
                return inner;
            }
        }
        t
    }
}
