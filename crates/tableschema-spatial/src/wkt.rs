//! Well-known-text encoding and decoding.
//!
//! Supports the seven geometry types in their 2D (and higher-dimension
//! positional) text form, including `EMPTY` for every tag. MultiPoint
//! accepts both the parenthesized (`((10 40), (40 30))`) and the bare
//! (`(10 40, 40 30)`) element spellings.

use tableschema_core::error::{Error, Result};

use crate::geometry::{Geometry, Position};

/// Serialize a geometry to well-known text.
#[must_use]
pub fn encode(geometry: &Geometry) -> String {
    let tag = geometry.geometry_type().to_uppercase();
    if geometry.is_empty() {
        return format!("{tag} EMPTY");
    }
    let body = match geometry {
        Geometry::Point(position) => fmt_position(position),
        Geometry::MultiPoint(positions) => fmt_grouped_positions(positions),
        Geometry::LineString(positions) => fmt_positions(positions),
        Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => fmt_lines(lines),
        Geometry::MultiPolygon(polygons) => polygons
            .iter()
            .map(|rings| format!("({})", fmt_lines(rings)))
            .collect::<Vec<_>>()
            .join(", "),
        Geometry::GeometryCollection(geometries) => {
            return format!(
                "{tag} ({})",
                geometries.iter().map(encode).collect::<Vec<_>>().join(", ")
            );
        }
    };
    format!("{tag} ({body})")
}

/// Parse well-known text into a geometry.
pub fn parse(input: &str) -> Result<Geometry> {
    let mut parser = Parser {
        input: input.as_bytes(),
        pos: 0,
    };
    let geometry = parser.geometry()?;
    parser.skip_whitespace();
    if parser.pos != parser.input.len() {
        return Err(parser.unexpected("trailing input"));
    }
    Ok(geometry)
}

fn fmt_number(value: f64) -> String {
    // Integral values print without a trailing ".0", matching the usual
    // WKT style.
    format!("{value}")
}

fn fmt_position(position: &Position) -> String {
    position
        .iter()
        .map(|n| fmt_number(*n))
        .collect::<Vec<_>>()
        .join(" ")
}

fn fmt_positions(positions: &[Position]) -> String {
    positions
        .iter()
        .map(fmt_position)
        .collect::<Vec<_>>()
        .join(", ")
}

fn fmt_grouped_positions(positions: &[Position]) -> String {
    positions
        .iter()
        .map(|p| format!("({})", fmt_position(p)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn fmt_lines(lines: &[Vec<Position>]) -> String {
    lines
        .iter()
        .map(|line| format!("({})", fmt_positions(line)))
        .collect::<Vec<_>>()
        .join(", ")
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn geometry(&mut self) -> Result<Geometry> {
        let tag = self.word()?;
        let upper = tag.to_uppercase();
        if self.peek_empty()? {
            return empty_geometry(&upper).ok_or_else(|| self.unexpected("unknown geometry tag"));
        }
        match upper.as_str() {
            "POINT" => {
                self.expect(b'(')?;
                let position = self.position()?;
                self.expect(b')')?;
                Ok(Geometry::Point(position))
            }
            "MULTIPOINT" => Ok(Geometry::MultiPoint(self.point_list()?)),
            "LINESTRING" => Ok(Geometry::LineString(self.position_list()?)),
            "MULTILINESTRING" => Ok(Geometry::MultiLineString(self.line_list()?)),
            "POLYGON" => Ok(Geometry::Polygon(self.line_list()?)),
            "MULTIPOLYGON" => {
                let polygons = self.comma_group(|p| p.line_list())?;
                Ok(Geometry::MultiPolygon(polygons))
            }
            "GEOMETRYCOLLECTION" => {
                let geometries = self.comma_group(|p| p.geometry())?;
                Ok(Geometry::GeometryCollection(geometries))
            }
            _ => Err(self.unexpected("unknown geometry tag")),
        }
    }

    /// Parse `( item (, item)* )` with a per-item parser.
    fn comma_group<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        self.expect(b'(')?;
        let mut items = vec![item(self)?];
        while self.consume(b',') {
            items.push(item(self)?);
        }
        self.expect(b')')?;
        Ok(items)
    }

    fn position_list(&mut self) -> Result<Vec<Position>> {
        self.comma_group(|p| p.position())
    }

    fn line_list(&mut self) -> Result<Vec<Vec<Position>>> {
        self.comma_group(|p| p.position_list())
    }

    /// MultiPoint elements may each be parenthesized.
    fn point_list(&mut self) -> Result<Vec<Position>> {
        self.comma_group(|p| {
            if p.consume(b'(') {
                let position = p.position()?;
                p.expect(b')')?;
                Ok(position)
            } else {
                p.position()
            }
        })
    }

    fn position(&mut self) -> Result<Position> {
        let mut numbers = vec![self.number()?];
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(c) if c == b',' || c == b')' => break,
                Some(_) => numbers.push(self.number()?),
                None => return Err(self.unexpected("unterminated coordinate list")),
            }
        }
        Ok(numbers)
    }

    fn number(&mut self) -> Result<f64> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, b'+' | b'-' | b'.' | b'e' | b'E') {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.unexpected("expected a number"));
        }
        let text = std::str::from_utf8(&self.input[start..self.pos]).unwrap_or_default();
        text.parse()
            .map_err(|_| self.unexpected("malformed number"))
    }

    fn word(&mut self) -> Result<String> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphabetic() {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.unexpected("expected a geometry tag"));
        }
        Ok(String::from_utf8_lossy(&self.input[start..self.pos]).into_owned())
    }

    /// Consume the `EMPTY` keyword if it follows.
    fn peek_empty(&mut self) -> Result<bool> {
        self.skip_whitespace();
        let rest = &self.input[self.pos..];
        if rest.len() >= 5 && rest[..5].eq_ignore_ascii_case(b"EMPTY") {
            self.pos += 5;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, expected: u8) -> Result<()> {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected(&format!("expected '{}'", expected as char)))
        }
    }

    fn consume(&mut self, expected: u8) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn unexpected(&self, message: &str) -> Error {
        Error::InvalidWkt {
            message: format!("{message} at byte {}", self.pos),
        }
    }
}

fn empty_geometry(tag: &str) -> Option<Geometry> {
    match tag {
        "POINT" => Some(Geometry::Point(vec![])),
        "MULTIPOINT" => Some(Geometry::MultiPoint(vec![])),
        "LINESTRING" => Some(Geometry::LineString(vec![])),
        "MULTILINESTRING" => Some(Geometry::MultiLineString(vec![])),
        "POLYGON" => Some(Geometry::Polygon(vec![])),
        "MULTIPOLYGON" => Some(Geometry::MultiPolygon(vec![])),
        "GEOMETRYCOLLECTION" => Some(Geometry::GeometryCollection(vec![])),
        _ => None,
    }
}
