//! Text rendering of the deck, one line per stack, bridge first.
//!
//! ```text
//! 0: || INKU2633836 || KOCU8090115 ||
//! 1: || *MSCU6639871* ||
//! 2: ||
//! ```

use std::fmt;

use stowage_core::IdentifierCode;
use stowage_manifest::Manifest;

/// Borrowed view of a deck that renders through [`fmt::Display`].
#[derive(Debug, Clone, Copy)]
pub struct DeckView<'a> {
    manifest: &'a Manifest,
    highlight: Option<&'a IdentifierCode>,
}

impl fmt::Display for DeckView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, stack) in self.manifest.stacks().enumerate() {
            write!(f, "{index}: ||")?;
            for container in stack {
                let code = container.code();
                if self.highlight == Some(code) {
                    write!(f, " *{code}* ||")?;
                } else {
                    write!(f, " {code} ||")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Render every stack bottom to top. `highlight` is wrapped in asterisks.
pub fn render_deck<'a>(
    manifest: &'a Manifest,
    highlight: Option<&'a IdentifierCode>,
) -> DeckView<'a> {
    DeckView {
        manifest,
        highlight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage_core::Container;

    fn code(raw: &str) -> IdentifierCode {
        IdentifierCode::parse(raw).unwrap()
    }

    #[test]
    fn test_render_empty_deck() {
        let manifest = Manifest::new(2, 2, 50).unwrap();
        assert_eq!(render_deck(&manifest, None).to_string(), "0: ||\n1: ||\n");
    }

    #[test]
    fn test_render_with_highlight() {
        let mut manifest = Manifest::new(3, 2, 120).unwrap();
        manifest
            .load(Container::general(code("INKU2633836"), 10).unwrap())
            .unwrap();
        manifest
            .load(Container::general(code("KOCU8090115"), 10).unwrap())
            .unwrap();
        manifest
            .load(Container::dangerous_goods(code("MSCU6639871"), 20, 1).unwrap())
            .unwrap();

        let target = code("KOCU8090115");
        let rendered = render_deck(&manifest, Some(&target)).to_string();
        assert_eq!(
            rendered,
            "0: || INKU2633836 || *KOCU8090115* ||\n1: || MSCU6639871 ||\n2: ||\n"
        );
    }

    #[test]
    fn test_highlight_of_absent_code_renders_plain() {
        let mut manifest = Manifest::new(1, 1, 30).unwrap();
        manifest
            .load(Container::general(code("INKU2633836"), 10).unwrap())
            .unwrap();
        let stranger = code("HBMU4882350");
        assert_eq!(
            render_deck(&manifest, Some(&stranger)).to_string(),
            "0: || INKU2633836 ||\n"
        );
    }
}
