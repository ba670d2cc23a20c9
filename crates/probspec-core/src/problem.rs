use std::collections::BTreeSet;

use probspec_curves::Curve;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::document::{self, Block, Document, Inline, RenderError};
use crate::interface::{BindingKind, Interface};
use crate::name::Name;
use crate::types::render_inlines;
use crate::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "tutorial")]
    Tutorial,
    #[serde(rename = "stage-1")]
    Stage1,
    #[serde(rename = "stage-2")]
    Stage2,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Tutorial => "tutorial",
            Stage::Stage1 => "stage-1",
            Stage::Stage2 => "stage-2",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "tutorial" => Some(Stage::Tutorial),
            "stage-1" => Some(Stage::Stage1),
            "stage-2" => Some(Stage::Stage2),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    /// Amount in US dollars.
    pub amount: u64,
    pub stage: Stage,
}

impl Prize {
    pub fn new(amount: u64, stage: Stage) -> Self {
        Self { amount, stage }
    }
}

/// Parameters handed to the background and closing document builders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemContext {
    pub moduli: BTreeSet<Name>,
    pub curves: BTreeSet<Curve>,
}

impl ProblemContext {
    pub fn from_interface(interface: &Interface) -> Self {
        let moduli = interface.moduli();
        let curves = moduli.iter().filter_map(Name::curve).collect();
        Self { moduli, curves }
    }

    /// The declared base-field modulus of `curve`, if the interface uses it.
    pub fn modulus(&self, curve: Curve) -> Option<&Name> {
        self.moduli
            .iter()
            .find(|m| m.curve() == Some(curve) && m.base() == "q")
    }
}

/// A fully assembled problem page. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    id: String,
    title: String,
    short_description: Document,
    prize: Prize,
    background: Document,
    interface: Interface,
    reference_implementation_url: String,
    closing: Document,
}

/// Assembles a problem. `background` and `closing` run exactly once each.
pub fn make_problem<B, C>(
    title: impl Into<String>,
    short_description: Document,
    prize: Prize,
    background: B,
    interface: Interface,
    closing: C,
) -> Problem
where
    B: FnOnce(&ProblemContext) -> Document,
    C: FnOnce(&ProblemContext) -> Document,
{
    let title = title.into();
    let span = info_span!("make_problem", title = %title);
    let _guard = span.enter();

    let ctx = ProblemContext::from_interface(&interface);
    let background = background(&ctx);
    let closing = closing(&ctx);
    debug!(
        moduli = ctx.moduli.len(),
        bindings = interface.bindings().len(),
        "assembled problem"
    );
    Problem {
        id: util::slugify(&title),
        title,
        short_description,
        prize,
        background,
        interface,
        reference_implementation_url: String::new(),
        closing,
    }
}

impl Problem {
    pub fn with_reference_implementation(mut self, url: impl Into<String>) -> Self {
        self.reference_implementation_url = url.into();
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: String,
        title: String,
        short_description: Document,
        prize: Prize,
        background: Document,
        interface: Interface,
        reference_implementation_url: String,
        closing: Document,
    ) -> Self {
        Self {
            id,
            title,
            short_description,
            prize,
            background,
            interface,
            reference_implementation_url,
            closing,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn short_description(&self) -> &Document {
        &self.short_description
    }

    pub fn prize(&self) -> Prize {
        self.prize
    }

    pub fn background(&self) -> &Document {
        &self.background
    }

    pub fn interface(&self) -> &Interface {
        &self.interface
    }

    pub fn reference_implementation_url(&self) -> &str {
        &self.reference_implementation_url
    }

    pub fn closing(&self) -> &Document {
        &self.closing
    }

    /// Every document the page is made of, labelled for error reporting.
    pub fn documents(&self) -> Vec<(String, &Document)> {
        let mut out = vec![
            ("short_description".to_string(), &self.short_description),
            ("background".to_string(), &self.background),
        ];
        for b in self.interface.bindings() {
            if let Some(note) = &b.note {
                out.push((format!("interface.{}.note", b.name), note));
            }
        }
        out.push((
            "interface.description".to_string(),
            self.interface.description(),
        ));
        out.push(("closing".to_string(), &self.closing));
        out
    }

    /// The publication page as one document.
    pub fn page(&self) -> Document {
        let mut page = Document::new()
            .heading(1, vec![Inline::text(self.title.clone())])
            .append(self.short_description.clone())
            .paragraph(vec![
                Inline::strong("Prize:"),
                Inline::text(format!(
                    " ${} ({})",
                    self.prize.amount,
                    self.prize.stage.as_str()
                )),
            ]);

        if !self.background.is_empty() {
            page = page
                .heading(2, vec![Inline::text("Background")])
                .append(self.background.clone());
        }

        page = page.heading(2, vec![Inline::text("Interface")]);
        for b in self.interface.bindings() {
            let kind = match b.kind {
                BindingKind::Input => "Input ",
                BindingKind::Output => "Output ",
            };
            page = page
                .heading(3, vec![Inline::text(kind), Inline::code(b.name.clone())])
                .paragraph(render_inlines(&b.ty));
            if let Some(note) = &b.note {
                page = page.append(note.clone());
            }
        }
        page = page.append(self.interface.description().clone());

        if !self.reference_implementation_url.is_empty() {
            page = page
                .heading(2, vec![Inline::text("Reference implementation")])
                .paragraph(vec![Inline::link(
                    "reference implementation",
                    self.reference_implementation_url.clone(),
                )]);
        }

        if !self.closing.is_empty() {
            page = page.push(Block::Rule).append(self.closing.clone());
        }
        page
    }

    pub fn to_markdown(&self) -> Result<String, RenderError> {
        document::to_markdown(&self.page())
    }
}
