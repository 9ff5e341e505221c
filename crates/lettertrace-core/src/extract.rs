//! Path extraction from SVG markup.
//!
//! Scans markup for drawing primitives and turns them into one canonical
//! path-command string. This is deliberately not a full SVG parser: only
//! element names and plain attributes are read, and transforms, styles and
//! nested documents are ignored.

use kurbo::BezPath;

/// Extract the primitives of `markup` as a parsed path.
///
/// Returns `None` when no primitive is recognized or when the collected
/// command string does not parse. Never panics.
pub fn extract(markup: &str) -> Option<BezPath> {
    let data = extract_path_data(markup)?;
    match BezPath::from_svg(&data) {
        Ok(path) => Some(path),
        Err(err) => {
            log::warn!("Discarding unparsable path data {:?}: {}", data, err);
            None
        }
    }
}

/// Extract the primitives of `markup` as a canonical command string.
///
/// A `<path>` contributes its `d` attribute verbatim. Circles and ellipses
/// become a closed pair of arcs, lines and polylines become move/line runs.
/// Several primitives are joined in document order; each keeps its own
/// absolute position.
pub fn extract_path_data(markup: &str) -> Option<String> {
    let mut commands: Vec<String> = Vec::new();
    for data in Elements::new(markup).filter_map(|element| element.to_commands()) {
        if commands.is_empty() {
            commands.push(data);
        } else {
            commands.push(absolute_start(data));
        }
    }

    if commands.is_empty() {
        None
    } else {
        Some(commands.join(" "))
    }
}

/// A leading relative `m` is absolute within its own `d`, but would become
/// relative to the previous primitive once joined. Re-emit such data with
/// absolute coordinates.
fn absolute_start(data: String) -> String {
    if !data.starts_with('m') {
        return data;
    }
    match BezPath::from_svg(&data) {
        Ok(path) => path.to_svg(),
        // Left as is; `extract` reports the parse failure.
        Err(_) => data,
    }
}

/// A start tag: name plus raw attribute pairs.
#[derive(Debug)]
struct Element<'a> {
    name: &'a str,
    attributes: Vec<(&'a str, &'a str)>,
}

impl<'a> Element<'a> {
    fn attr(&self, key: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.attr(key).and_then(parse_length)
    }

    fn to_commands(&self) -> Option<String> {
        match self.name {
            "path" => {
                let d = self.attr("d")?.trim();
                (!d.is_empty()).then(|| d.to_string())
            }
            "circle" => {
                let r = self.number("r")?;
                self.ellipse_commands(r, r)
            }
            "ellipse" => {
                let rx = self.number("rx")?;
                let ry = self.number("ry")?;
                self.ellipse_commands(rx, ry)
            }
            "line" => {
                let x1 = self.number("x1").unwrap_or(0.0);
                let y1 = self.number("y1").unwrap_or(0.0);
                let x2 = self.number("x2").unwrap_or(0.0);
                let y2 = self.number("y2").unwrap_or(0.0);
                Some(format!("M {} {} L {} {}", x1, y1, x2, y2))
            }
            "polyline" => self.poly_commands(false),
            "polygon" => self.poly_commands(true),
            _ => None,
        }
    }

    /// Two half-ellipse arcs starting and ending at the leftmost point.
    fn ellipse_commands(&self, rx: f64, ry: f64) -> Option<String> {
        if !(rx > 0.0 && ry > 0.0) {
            return None;
        }
        let cx = self.number("cx").unwrap_or(0.0);
        let cy = self.number("cy").unwrap_or(0.0);
        Some(format!(
            "M {} {} A {} {} 0 1 0 {} {} A {} {} 0 1 0 {} {} Z",
            cx - rx,
            cy,
            rx,
            ry,
            cx + rx,
            cy,
            rx,
            ry,
            cx - rx,
            cy
        ))
    }

    fn poly_commands(&self, close: bool) -> Option<String> {
        let numbers: Vec<f64> = self
            .attr("points")?
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(str::parse::<f64>)
            .collect::<Result<_, _>>()
            .ok()?;

        let mut pairs = numbers.chunks_exact(2);
        let first = pairs.next()?;
        let mut commands = format!("M {} {}", first[0], first[1]);
        for pair in pairs {
            commands.push_str(&format!(" L {} {}", pair[0], pair[1]));
        }
        if close {
            commands.push_str(" Z");
        }
        Some(commands)
    }
}

/// Accepts plain numbers and a trailing `px`.
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let value = value.strip_suffix("px").unwrap_or(value);
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Iterator over the start tags of a markup string.
struct Elements<'a> {
    rest: &'a str,
}

impl<'a> Elements<'a> {
    fn new(markup: &'a str) -> Self {
        Self { rest: markup }
    }
}

impl<'a> Iterator for Elements<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let open = self.rest.find('<')?;
            let tag = &self.rest[open + 1..];

            // Comments, declarations and processing instructions carry no shapes.
            if let Some(body) = tag.strip_prefix("!--") {
                let end = body.find("-->").map(|i| i + 3).unwrap_or(body.len());
                self.rest = &body[end..];
                continue;
            }
            if tag.starts_with('!') || tag.starts_with('?') || tag.starts_with('/') {
                let end = tag.find('>').map(|i| i + 1).unwrap_or(tag.len());
                self.rest = &tag[end..];
                continue;
            }

            let (element, consumed) = parse_start_tag(tag);
            self.rest = &tag[consumed..];
            if let Some(element) = element {
                return Some(element);
            }
        }
    }
}

/// Parse `name attr="value" ...>` and report how many bytes were consumed.
fn parse_start_tag(tag: &str) -> (Option<Element<'_>>, usize) {
    let name_end = tag
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(tag.len());
    let name = &tag[..name_end];
    if name.is_empty() {
        return (None, name_end.max(1).min(tag.len()));
    }

    let mut attributes = Vec::new();
    let mut pos = name_end;
    let bytes = tag.as_bytes();

    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }
        match bytes[pos] {
            b'>' => {
                pos += 1;
                break;
            }
            b'/' => {
                pos += 1;
                continue;
            }
            _ => {}
        }

        let key_start = pos;
        while pos < bytes.len()
            && !bytes[pos].is_ascii_whitespace()
            && !matches!(bytes[pos], b'=' | b'>' | b'/')
        {
            pos += 1;
        }
        let key = &tag[key_start..pos];

        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos < bytes.len() && bytes[pos] == b'=' {
            pos += 1;
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            let value = if pos < bytes.len() && matches!(bytes[pos], b'"' | b'\'') {
                let quote = bytes[pos];
                let value_start = pos + 1;
                let value_end = tag[value_start..]
                    .bytes()
                    .position(|b| b == quote)
                    .map(|i| value_start + i)
                    .unwrap_or(tag.len());
                pos = (value_end + 1).min(tag.len());
                &tag[value_start..value_end]
            } else {
                let value_start = pos;
                while pos < bytes.len()
                    && !bytes[pos].is_ascii_whitespace()
                    && bytes[pos] != b'>'
                {
                    pos += 1;
                }
                &tag[value_start..pos]
            };
            attributes.push((key, value));
        } else if key.is_empty() {
            // Stray byte; skip it.
            pos += 1;
        }
    }

    (Some(Element { name, attributes }), pos)
}
