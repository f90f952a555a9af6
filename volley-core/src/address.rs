use std::fmt;

use serde_json::Value as JsonValue;

/// One builder call in a chain: the method name plus the arguments it was called with.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub name: String,
    pub args: Vec<JsonValue>,
}

impl Segment {
    pub fn new(name: impl Into<String>, args: Vec<JsonValue>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// A segment without arguments is unqualified and matches any arguments at its position.
    pub fn is_unqualified(&self) -> bool {
        self.args.is_empty()
    }
}

/// The builder chain a step originated from, e.g. `expect().status().equal(200)`.
///
/// Addresses are immutable: `push` returns a new address and leaves the parent untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    segments: Vec<Segment>,
}

impl Address {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::new(name, Vec::new())],
        }
    }

    pub fn push(&self, name: impl Into<String>, args: Vec<JsonValue>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::new(name, args));
        Self { segments }
    }

    /// Appends every segment of `other` after this address.
    pub fn join(&self, other: &Address) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Reports whether `pattern` is a prefix of this address.
    ///
    /// Names must be equal at every pattern position. A pattern segment that carries
    /// arguments additionally requires the candidate's arguments to be identical (order and
    /// length included); an unqualified pattern segment accepts any arguments. An unqualified
    /// last segment therefore selects the whole subtree below it.
    pub fn matches(&self, pattern: &Address) -> bool {
        if pattern.segments.len() > self.segments.len() {
            return false;
        }
        pattern
            .segments
            .iter()
            .zip(&self.segments)
            .all(|(p, c)| p.name == c.name && (p.is_unqualified() || p.args == c.args))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&seg.name);
            out.push('(');
            for (j, arg) in seg.args.iter().enumerate() {
                if j > 0 {
                    out.push_str(", ");
                }
                out.push_str(&arg.to_string());
            }
            out.push(')');
        }
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
