//! Ordered field tokenizer for the LSS packet grammar.
//!
//! Fields are consumed strictly left to right: direction marker, device id
//! digits, optional kind letter, command letters, optional signed integer,
//! trailing text. Each method consumes at most its own field, so the parser
//! never indexes into the packet text directly.

pub(crate) struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let end = self
            .rest
            .find(|ch| !pred(ch))
            .unwrap_or(self.rest.len());
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        taken
    }

    /// Consume the direction marker (`#` or `*`), if present.
    pub(crate) fn take_direction(&mut self) -> Option<char> {
        let ch = self.rest.chars().next()?;
        if ch == '#' || ch == '*' {
            self.rest = &self.rest[1..];
            Some(ch)
        } else {
            None
        }
    }

    /// Consume one or more decimal digits.
    pub(crate) fn take_digits(&mut self) -> Option<&'a str> {
        let digits = self.take_while(|ch| ch.is_ascii_digit());
        if digits.is_empty() { None } else { Some(digits) }
    }

    /// Consume a kind letter (`Q` or `C`, either case), normalized to upper.
    pub(crate) fn take_kind(&mut self) -> Option<char> {
        let ch = self.rest.chars().next()?;
        if matches!(ch, 'Q' | 'q' | 'C' | 'c') {
            self.rest = &self.rest[1..];
            Some(ch.to_ascii_uppercase())
        } else {
            None
        }
    }

    /// Consume zero or more ASCII letters.
    pub(crate) fn take_letters(&mut self) -> &'a str {
        self.take_while(|ch| ch.is_ascii_alphabetic())
    }

    /// Consume an optional minus sign followed by digits, or a lone minus.
    ///
    /// A lone minus is returned as `"-"`; the parser decides whether it
    /// belongs to the trailing text.
    pub(crate) fn take_signed_number(&mut self) -> Option<&'a str> {
        let signed = self.rest.starts_with('-');
        let body = if signed { &self.rest[1..] } else { self.rest };
        let digits_len = body
            .find(|ch: char| !ch.is_ascii_digit())
            .unwrap_or(body.len());
        let total = digits_len + usize::from(signed);
        if total == 0 {
            return None;
        }
        let (taken, rest) = self.rest.split_at(total);
        self.rest = rest;
        Some(taken)
    }

    /// Consume trailing alphanumeric/`.`/`-` text.
    pub(crate) fn take_extra(&mut self) -> &'a str {
        self.take_while(|ch| ch.is_ascii_alphanumeric() || ch == '.' || ch == '-')
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Scanner;

    #[test]
    fn scans_full_request() {
        let mut scanner = Scanner::new("#12D521");
        assert_eq!(scanner.take_direction(), Some('#'));
        assert_eq!(scanner.take_digits(), Some("12"));
        assert_eq!(scanner.take_kind(), None);
        assert_eq!(scanner.take_letters(), "D");
        assert_eq!(scanner.take_signed_number(), Some("521"));
        assert_eq!(scanner.take_extra(), "");
        assert!(scanner.is_empty());
    }

    #[test]
    fn kind_letter_is_case_insensitive() {
        let mut scanner = Scanner::new("*3qd");
        scanner.take_direction();
        scanner.take_digits();
        assert_eq!(scanner.take_kind(), Some('Q'));
        assert_eq!(scanner.take_letters(), "d");
    }

    #[test]
    fn lone_minus_is_returned_as_sign() {
        let mut scanner = Scanner::new("-HT1");
        assert_eq!(scanner.take_signed_number(), Some("-"));
        assert_eq!(scanner.take_extra(), "HT1");
    }

    #[test]
    fn negative_number_consumes_sign_and_digits() {
        let mut scanner = Scanner::new("-1190x");
        assert_eq!(scanner.take_signed_number(), Some("-1190"));
        assert_eq!(scanner.take_extra(), "x");
    }

    #[test]
    fn trailing_minus_goes_to_extra() {
        let mut scanner = Scanner::new("12-");
        assert_eq!(scanner.take_signed_number(), Some("12"));
        assert_eq!(scanner.take_extra(), "-");
        assert!(scanner.is_empty());
    }

    #[test]
    fn unconsumable_byte_is_left_in_place() {
        let mut scanner = Scanner::new("ab ");
        assert_eq!(scanner.take_letters(), "ab");
        assert_eq!(scanner.take_extra(), "");
        assert!(!scanner.is_empty());
    }
}
