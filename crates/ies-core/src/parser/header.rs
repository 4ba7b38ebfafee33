use crate::domain::{Header, HeaderKeyword, IesError, IesResult};

pub(crate) const VERSION_MARKER: &str = "IESNA";
pub(crate) const TILT_MARKER: &str = "TILT=";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeaderField {
    Manufacturer,
    CatalogNumber,
    Luminaire,
    Lamp,
    Date,
    Ballast,
}

impl HeaderField {
    pub(crate) const ALL: [Self; 6] = [
        Self::Manufacturer,
        Self::CatalogNumber,
        Self::Luminaire,
        Self::Lamp,
        Self::Date,
        Self::Ballast,
    ];

    pub(crate) fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "MANUFAC" | "MANUFACTURER" => Some(Self::Manufacturer),
            "LUMCAT" => Some(Self::CatalogNumber),
            "LUMINAIRE" => Some(Self::Luminaire),
            "LAMP" => Some(Self::Lamp),
            "DATE" | "ISSUEDATE" => Some(Self::Date),
            "BALLAST" => Some(Self::Ballast),
            _ => None,
        }
    }

    pub(crate) fn tag(self) -> &'static str {
        match self {
            Self::Manufacturer => "MANUFAC",
            Self::CatalogNumber => "LUMCAT",
            Self::Luminaire => "LUMINAIRE",
            Self::Lamp => "LAMP",
            Self::Date => "DATE",
            Self::Ballast => "BALLAST",
        }
    }

    pub(crate) fn value(self, header: &Header) -> &str {
        match self {
            Self::Manufacturer => &header.manufacturer,
            Self::CatalogNumber => &header.catalog_number,
            Self::Luminaire => &header.luminaire,
            Self::Lamp => &header.lamp,
            Self::Date => &header.date,
            Self::Ballast => &header.ballast,
        }
    }

    fn slot(self, header: &mut Header) -> &mut String {
        match self {
            Self::Manufacturer => &mut header.manufacturer,
            Self::CatalogNumber => &mut header.catalog_number,
            Self::Luminaire => &mut header.luminaire,
            Self::Lamp => &mut header.lamp,
            Self::Date => &mut header.date,
            Self::Ballast => &mut header.ballast,
        }
    }
}

/// Reads the keyword block starting at `start` and returns the header along
/// with the index of the `TILT=` line, which is left unconsumed.
pub fn parse_header(lines: &[&str], start: usize) -> IesResult<(Header, usize)> {
    let mut header = Header::default();
    let mut filled = Vec::new();
    let mut index = start;

    if let Some(first) = lines.get(index)
        && first.trim_start().starts_with(VERSION_MARKER)
    {
        header.version = Some(first.trim().to_string());
        index += 1;
    }

    while let Some(line) = lines.get(index) {
        let trimmed = line.trim();
        if trimmed.starts_with(TILT_MARKER) {
            return Ok((header, index));
        }

        if let Some((keyword, value)) = split_bracket_keyword(trimmed) {
            match HeaderField::from_keyword(keyword) {
                Some(field) if !filled.contains(&field) => {
                    *field.slot(&mut header) = value.to_string();
                    filled.push(field);
                }
                _ => header.keywords.push(HeaderKeyword::new(keyword, value)),
            }
        }

        index += 1;
    }

    Err(IesError::malformed_header(
        index,
        format!("reached end of file without a '{TILT_MARKER}' line"),
    ))
}

fn split_bracket_keyword(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('[')?;
    let (keyword, value) = rest.split_once(']')?;
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return None;
    }
    Some((keyword, value.trim()))
}
