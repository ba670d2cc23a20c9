use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String },
    Code { text: String },
    Emph { text: String },
    Strong { text: String },
    Math { tex: String },
    Link { text: String, url: String },
}

impl Inline {
    pub fn text(s: impl Into<String>) -> Self {
        Inline::Text { text: s.into() }
    }

    pub fn code(s: impl Into<String>) -> Self {
        Inline::Code { text: s.into() }
    }

    pub fn emph(s: impl Into<String>) -> Self {
        Inline::Emph { text: s.into() }
    }

    pub fn strong(s: impl Into<String>) -> Self {
        Inline::Strong { text: s.into() }
    }

    pub fn math(tex: impl Into<String>) -> Self {
        Inline::Math { tex: tex.into() }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Inline::Link {
            text: text.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: u8,
        inlines: Vec<Inline>,
    },
    Paragraph {
        inlines: Vec<Inline>,
    },
    List {
        ordered: bool,
        items: Vec<Vec<Inline>>,
    },
    CodeBlock {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        code: String,
    },
    Rule,
}

/// Structured markup tree. Converted to flat text exactly once per render via
/// [`to_markdown`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn push(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn heading(self, level: u8, inlines: Vec<Inline>) -> Self {
        self.push(Block::Heading { level, inlines })
    }

    pub fn paragraph(self, inlines: Vec<Inline>) -> Self {
        self.push(Block::Paragraph { inlines })
    }

    /// Shorthand for a paragraph holding a single run of plain text.
    pub fn text(self, s: impl Into<String>) -> Self {
        self.paragraph(vec![Inline::text(s)])
    }

    pub fn list(self, ordered: bool, items: Vec<Vec<Inline>>) -> Self {
        self.push(Block::List { ordered, items })
    }

    pub fn code_block(self, lang: Option<&str>, code: impl Into<String>) -> Self {
        self.push(Block::CodeBlock {
            lang: lang.map(str::to_string),
            code: code.into(),
        })
    }

    pub fn rule(self) -> Self {
        self.push(Block::Rule)
    }

    pub fn append(mut self, other: Document) -> Self {
        self.blocks.extend(other.blocks);
        self
    }
}

impl From<Vec<Block>> for Document {
    fn from(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderErrorKind {
    HeadingLevel,
    EmptyLinkUrl,
    EmptyList,
}

#[derive(Debug, Clone)]
pub struct RenderError {
    pub kind: RenderErrorKind,
    pub message: String,
}

impl RenderError {
    pub fn new(kind: RenderErrorKind, message: String) -> Self {
        Self { kind, message }
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "document rendering failed: {}", self.message)
    }
}

impl std::error::Error for RenderError {}

/// Converts a document to markdown text.
///
/// Blocks are separated by one blank line and the output always ends with a
/// single newline (empty documents render as the empty string).
pub fn to_markdown(doc: &Document) -> Result<String, RenderError> {
    let mut out = String::new();
    for (idx, block) in doc.blocks.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        write_block(&mut out, idx, block)?;
    }
    Ok(out)
}

fn write_block(out: &mut String, idx: usize, block: &Block) -> Result<(), RenderError> {
    match block {
        Block::Heading { level, inlines } => {
            if !(1..=6).contains(level) {
                return Err(RenderError::new(
                    RenderErrorKind::HeadingLevel,
                    format!("block {idx}: heading level {level} is outside 1..=6"),
                ));
            }
            for _ in 0..*level {
                out.push('#');
            }
            out.push(' ');
            write_inlines(out, inlines)?;
            out.push('\n');
        }
        Block::Paragraph { inlines } => {
            write_inlines(out, inlines)?;
            out.push('\n');
        }
        Block::List { ordered, items } => {
            if items.is_empty() {
                return Err(RenderError::new(
                    RenderErrorKind::EmptyList,
                    format!("block {idx}: list has no items"),
                ));
            }
            for (n, item) in items.iter().enumerate() {
                if *ordered {
                    out.push_str(&format!("{}. ", n + 1));
                } else {
                    out.push_str("- ");
                }
                write_inlines(out, item)?;
                out.push('\n');
            }
        }
        Block::CodeBlock { lang, code } => {
            out.push_str("```");
            if let Some(lang) = lang {
                out.push_str(lang);
            }
            out.push('\n');
            out.push_str(code);
            if !code.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }
        Block::Rule => out.push_str("---\n"),
    }
    Ok(())
}

fn write_inlines(out: &mut String, inlines: &[Inline]) -> Result<(), RenderError> {
    for inline in inlines {
        match inline {
            Inline::Text { text } => out.push_str(text),
            Inline::Code { text } => {
                out.push('`');
                out.push_str(text);
                out.push('`');
            }
            Inline::Emph { text } => {
                out.push('*');
                out.push_str(text);
                out.push('*');
            }
            Inline::Strong { text } => {
                out.push_str("**");
                out.push_str(text);
                out.push_str("**");
            }
            Inline::Math { tex } => {
                out.push('$');
                out.push_str(tex);
                out.push('$');
            }
            Inline::Link { text, url } => {
                if url.trim().is_empty() {
                    return Err(RenderError::new(
                        RenderErrorKind::EmptyLinkUrl,
                        format!("link {text:?} has an empty url"),
                    ));
                }
                out.push('[');
                out.push_str(text);
                out.push_str("](");
                out.push_str(url);
                out.push(')');
            }
        }
    }
    Ok(())
}
