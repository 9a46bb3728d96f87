//! Recursive descent parser for manifests

use super::ast::{Item, ItemKind, Manifest, Setting};
use super::scanner::Lexer;
use super::token::{Token, TokenKind};
use crate::common::{PackError, PackResult, Span};
use mech::assets::BitmapFormat;

/// Recursive descent parser for manifests
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> PackResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the whole manifest
    pub fn parse(&mut self) -> PackResult<Manifest> {
        let mut manifest = Manifest::default();
        while !self.at_end() {
            self.parse_statement(&mut manifest)?;
        }
        Ok(manifest)
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> PackResult<Token> {
        let prev = std::mem::replace(&mut self.current, self.lexer.next_token()?);
        Ok(prev)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> PackResult<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn error_expected(&self, what: &str) -> PackError {
        PackError::parser(format!("expected {}, found {}", what, self.current.kind), self.current.span)
    }

    fn expect_name(&mut self) -> PackResult<(String, Span)> {
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                let span = self.advance()?.span;
                Ok((name, span))
            }
            _ => Err(self.error_expected("asset name")),
        }
    }

    fn expect_path(&mut self) -> PackResult<(String, Span)> {
        match &self.current.kind {
            TokenKind::StringLiteral(path) if path.is_empty() => {
                Err(PackError::manifest("empty file path", self.current.span))
            }
            TokenKind::StringLiteral(path) => {
                let path = path.clone();
                let span = self.advance()?.span;
                Ok((path, span))
            }
            _ => Err(self.error_expected("quoted file path")),
        }
    }

    /// Decimal or `0x` hex number no larger than `max`
    fn expect_number(&mut self, what: &str, max: u64) -> PackResult<(u64, Span)> {
        let span = self.current.span;
        let parsed = match &self.current.kind {
            TokenKind::IntLiteral(s) => s.parse::<u64>(),
            TokenKind::HexLiteral(s) => u64::from_str_radix(&s[2..], 16),
            _ => return Err(self.error_expected(what)),
        };
        self.advance()?;
        match parsed {
            Ok(value) if value <= max => Ok((value, span)),
            _ => Err(PackError::manifest(format!("{} must be at most {}", what, max), span)),
        }
    }

    fn expect_nonzero(&mut self, what: &str, max: u64) -> PackResult<(u64, Span)> {
        let (value, span) = self.expect_number(what, max)?;
        if value == 0 {
            return Err(PackError::manifest(format!("{} must not be zero", what), span));
        }
        Ok((value, span))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_statement(&mut self, manifest: &mut Manifest) -> PackResult<()> {
        match self.current.kind {
            TokenKind::Bitmap => {
                let item = self.parse_bitmap()?;
                manifest.items.push(item);
            }
            TokenKind::Record => {
                let item = self.parse_record()?;
                manifest.items.push(item);
            }
            TokenKind::Save => {
                let start = self.advance()?.span;
                let (value, span) = self.expect_nonzero("save size", u64::from(mech::assets::MAX_OFFSET) + 1)?;
                set_once(&mut manifest.settings.save_size, value as u32, start.merge(span), "save size")?;
            }
            TokenKind::DataPage => {
                let start = self.advance()?.span;
                let (value, span) = self.expect_number("data page", u64::from(u16::MAX))?;
                set_once(&mut manifest.settings.data_page, value as u16, start.merge(span), "data page")?;
            }
            TokenKind::SavePage => {
                let start = self.advance()?.span;
                let (value, span) = self.expect_number("save page", u64::from(u16::MAX))?;
                set_once(&mut manifest.settings.save_page, value as u16, start.merge(span), "save page")?;
            }
            _ => return Err(self.error_expected("a statement")),
        }
        Ok(())
    }

    fn parse_bitmap(&mut self) -> PackResult<Item> {
        let start = self.advance()?.span;
        let (name, name_span) = self.expect_name()?;
        let (width, _) = self.expect_nonzero("bitmap width", u64::from(u16::MAX))?;
        let (height, _) = self.expect_nonzero("bitmap height", u64::from(u16::MAX))?;

        let mut frames = 1;
        if self.match_token(&TokenKind::Frames)? {
            frames = self.expect_nonzero("frame count", u64::from(u8::MAX))?.0;
        }
        let format = if self.match_token(&TokenKind::Masked)? {
            BitmapFormat::Masked
        } else {
            BitmapFormat::Plain
        };

        let (file, file_span) = self.expect_path()?;
        Ok(Item {
            name,
            name_span,
            kind: ItemKind::Bitmap {
                width: width as u16,
                height: height as u16,
                frames: frames as u8,
                format,
            },
            file,
            file_span,
            span: start.merge(file_span),
        })
    }

    fn parse_record(&mut self) -> PackResult<Item> {
        let start = self.advance()?.span;
        let (name, name_span) = self.expect_name()?;
        let (file, file_span) = self.expect_path()?;
        Ok(Item {
            name,
            name_span,
            kind: ItemKind::Record,
            file,
            file_span,
            span: start.merge(file_span),
        })
    }
}

fn set_once<T>(slot: &mut Option<Setting<T>>, value: T, span: Span, what: &str) -> PackResult<()> {
    if slot.is_some() {
        return Err(PackError::manifest(format!("{} is already set", what), span));
    }
    *slot = Some(Setting { value, span });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_items_in_order() {
        let source = r#"
# stats first
record mothra_stats "records/mothra.bin"
bitmap mech_6x8 6 8 masked "bitmaps/mech.bin"
bitmap boom_23x23 23 23 frames 7 masked "bitmaps/boom.bin"
bitmap day_str 20 6 "strings/day.bin"
"#;
        let manifest = parse(source).unwrap();
        let names: Vec<_> = manifest.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["mothra_stats", "mech_6x8", "boom_23x23", "day_str"]);

        assert_eq!(manifest.items[0].kind, ItemKind::Record);
        assert!(!manifest.items[0].is_bitmap());
        assert!(manifest.items[1].is_bitmap());
        assert_eq!(
            manifest.items[2].kind,
            ItemKind::Bitmap {
                width: 23,
                height: 23,
                frames: 7,
                format: BitmapFormat::Masked,
            }
        );
        assert_eq!(
            manifest.items[3].kind,
            ItemKind::Bitmap {
                width: 20,
                height: 6,
                frames: 1,
                format: BitmapFormat::Plain,
            }
        );
        assert_eq!(manifest.items[3].file, "strings/day.bin");
    }

    #[test]
    fn test_parse_settings() {
        let manifest = parse("data_page 0xfdb1\nsave_page 65520\nsave 4096\n").unwrap();
        let settings = manifest.settings;
        assert_eq!(settings.data_page.map(|s| s.value), Some(0xfdb1));
        assert_eq!(settings.save_page.map(|s| s.value), Some(0xfff0));
        assert_eq!(settings.save_size.map(|s| s.value), Some(4096));
        assert!(manifest.items.is_empty());
    }

    #[test]
    fn test_setting_twice() {
        let err = parse("save 4096\nsave 8192\n").unwrap_err();
        assert!(matches!(err, PackError::Manifest { span, .. } if span == Span::new(10, 19)));
    }

    #[test]
    fn test_zero_width() {
        let err = parse("bitmap empty 0 8 \"e.bin\"").unwrap_err();
        assert!(matches!(err, PackError::Manifest { message, .. } if message == "bitmap width must not be zero"));
    }

    #[test]
    fn test_frames_out_of_range() {
        let err = parse("bitmap many 8 8 frames 300 \"m.bin\"").unwrap_err();
        assert!(matches!(err, PackError::Manifest { span, .. } if span == Span::new(23, 26)));
    }

    #[test]
    fn test_missing_path() {
        let err = parse("record stats\nbitmap x 1 1 \"x.bin\"").unwrap_err();
        assert!(matches!(
            err,
            PackError::Parser { message, .. } if message == "expected quoted file path, found 'bitmap'"
        ));
    }

    #[test]
    fn test_stray_token() {
        let err = parse("0x10").unwrap_err();
        assert!(matches!(err, PackError::Parser { span, .. } if span == Span::new(0, 4)));
    }
}
