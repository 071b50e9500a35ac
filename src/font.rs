use crate::{PSError, Pt};
use std::fmt;
use std::str::FromStr;

/// The slant of a font
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// A font request in the familiar `"Family [Style...] [Size]"` form, e.g.
/// `"Monospace Bold 12"` or `"DejaVu Sans Oblique 9.5"`.
///
/// Parsing is lenient about case for style words. Every word that isn't a
/// style keyword or the trailing size becomes part of the family name.
///
/// ```
/// use textps::{FontDescription, FontStyle, Pt};
///
/// let desc: FontDescription = "Monospace Bold Italic 10".parse().unwrap();
/// assert_eq!(desc.family, "Monospace");
/// assert!(desc.bold);
/// assert_eq!(desc.style, FontStyle::Italic);
/// assert_eq!(desc.size, Pt(10.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescription {
    pub family: String,
    pub bold: bool,
    pub style: FontStyle,
    pub size: Pt,
}

impl Default for FontDescription {
    fn default() -> Self {
        FontDescription::new("Monospace", Pt(12.0))
    }
}

impl FontDescription {
    pub fn new<S: ToString>(family: S, size: Pt) -> FontDescription {
        FontDescription {
            family: family.to_string(),
            bold: false,
            style: FontStyle::Normal,
            size,
        }
    }

    /// The same face with the weight set to bold
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl FromStr for FontDescription {
    type Err = PSError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words: Vec<&str> = s.split_whitespace().collect();
        let mut desc = FontDescription::default();

        if let Some(size) = words.last().and_then(|w| w.parse::<f32>().ok()) {
            if !(size.is_finite() && size > 0.0) {
                return Err(PSError::FontDescription(s.to_string()));
            }
            desc.size = Pt(size);
            words.pop();
        }

        let mut family: Vec<&str> = Vec::with_capacity(words.len());
        for word in words {
            match word.to_ascii_lowercase().as_str() {
                "bold" => desc.bold = true,
                "italic" => desc.style = FontStyle::Italic,
                "oblique" => desc.style = FontStyle::Oblique,
                "normal" | "regular" | "roman" => {}
                _ => family.push(word),
            }
        }

        if family.is_empty() {
            return Err(PSError::FontDescription(s.to_string()));
        }
        desc.family = family.join(" ");
        Ok(desc)
    }
}

impl fmt::Display for FontDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.family)?;
        if self.bold {
            write!(f, " Bold")?;
        }
        match self.style {
            FontStyle::Normal => {}
            FontStyle::Italic => write!(f, " Italic")?,
            FontStyle::Oblique => write!(f, " Oblique")?,
        }
        write!(f, " {}", self.size.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_optional() {
        let desc: FontDescription = "Serif".parse().unwrap();
        assert_eq!(desc.family, "Serif");
        assert_eq!(desc.size, Pt(12.0));
        assert!(!desc.bold);
    }

    #[test]
    fn multi_word_families_are_kept() {
        let desc: FontDescription = "DejaVu Sans oblique 9.5".parse().unwrap();
        assert_eq!(desc.family, "DejaVu Sans");
        assert_eq!(desc.style, FontStyle::Oblique);
        assert_eq!(desc.size, Pt(9.5));
    }

    #[test]
    fn rejects_descriptions_without_a_family() {
        assert!("Bold 12".parse::<FontDescription>().is_err());
        assert!("".parse::<FontDescription>().is_err());
        assert!("Monospace 0".parse::<FontDescription>().is_err());
    }

    #[test]
    fn displays_in_parseable_form() {
        let desc = FontDescription::new("Monospace", Pt(12.0)).bold();
        assert_eq!(desc.to_string(), "Monospace Bold 12");
        assert_eq!(desc.to_string().parse::<FontDescription>().unwrap(), desc);
    }
}
