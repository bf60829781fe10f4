//! Text rendering of a [`SuitePlan`].
//!
//! Each batch becomes a function template over the source iterator template
//! `InIter`; each scenario registers one `it(...)` case calling the aliasing
//! or non-aliasing copy assertion. The entry point instantiates every batch
//! with the plain or const iterator.

use std::fmt::Write as FmtWrite;

use quickcopy_corpus::{ConfigPair, CopyKind};
use quickcopy_space::{ByteOrder, Configuration, IteratorShape};

use crate::batch::Scenario;
use crate::suite::SuitePlan;

/// Turns a structured suite into source text.
pub trait Renderer {
    fn render(&self, plan: &SuitePlan) -> String;
}

/// Renders bandit-style C++ against the `bitter` bit iterator library.
#[derive(Debug, Clone)]
pub struct BanditRenderer {
    /// Header included at the top of the file.
    pub header: String,
    /// Column that description literals are wrapped at.
    pub wrap_column: usize,
}

impl Default for BanditRenderer {
    fn default() -> Self {
        Self {
            header: "test_bit_iterator_copy_quick.hpp".to_string(),
            wrap_column: 80,
        }
    }
}

const IT_PREFIX: &str = "    it(";

impl Renderer for BanditRenderer {
    fn render(&self, plan: &SuitePlan) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "#include <{}>", self.header);

        for (name, section, batch) in plan.batch_fns() {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "template <template <bit_order, typename, byte_order> class InIter>"
            );
            let _ = writeln!(out, "void {name}()");
            let _ = writeln!(out, "{{");
            let _ = writeln!(out, "    using namespace bitter;");
            let _ = writeln!(out);
            for scenario in &batch.scenarios {
                self.render_scenario(&mut out, section.kind, scenario);
            }
            let _ = writeln!(out, "}}");
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "void {}()", plan.entry_name());
        let _ = writeln!(out, "{{");
        for (name, _, _) in plan.batch_fns() {
            let _ = writeln!(out, "    {name}<{}>();", plan.constness.iterator_template());
        }
        let _ = writeln!(out, "}}");

        out
    }
}

impl BanditRenderer {
    fn render_scenario(&self, out: &mut String, kind: CopyKind, scenario: &Scenario) {
        let literal = format!("\"{}\",", describe(kind, &scenario.pair, scenario.fill));
        let non = if kind.is_aliasing() { "" } else { "non_" };
        let fill_arg = match scenario.fill {
            Some(fill) => format!(", bitter::bit({fill})"),
            None => String::new(),
        };

        let _ = writeln!(
            out,
            "{IT_PREFIX}{}",
            wrap_literal(&literal, IT_PREFIX.len(), self.wrap_column)
        );
        let _ = writeln!(out, "       [] {{");
        let _ = writeln!(out, "           test_{non}aliasing_copy<");
        let _ = writeln!(
            out,
            "               {},",
            iterator_type("InIter", &scenario.pair.source)
        );
        let _ = writeln!(
            out,
            "               {}>(",
            iterator_type("bit_iterator", &scenario.pair.destination)
        );
        let _ = writeln!(
            out,
            "               for_each_quicktest_range{{}}{fill_arg});"
        );
        let _ = writeln!(out, "       }});");
    }
}

/// Human-readable description of one scenario.
pub fn describe(kind: CopyKind, pair: &ConfigPair, fill: Option<bool>) -> String {
    let non = if kind.is_aliasing() { "" } else { "non-" };
    let fill = match fill {
        Some(fill) => format!(" (fill={})", u8::from(fill)),
        None => String::new(),
    };
    format!(
        "correctly performs {non}aliasing copies from {} to {}{fill}",
        short_name(&pair.source),
        short_name(&pair.destination)
    )
}

/// `reverse<msb0,uint16_t,lsb0>`, or `<msb0,uint8_t,none>` for forward.
fn short_name(config: &Configuration) -> String {
    let shape = match config.shape {
        IteratorShape::Forward => "",
        IteratorShape::Reverse => "reverse",
    };
    format!(
        "{shape}<{},{},{}>",
        config.bit_order.as_str(),
        unit_type(config),
        config.byte_order.as_str()
    )
}

fn unit_type(config: &Configuration) -> String {
    format!("uint{}_t", config.width.bits())
}

/// Concrete C++ iterator type for `config` built on `template`.
pub fn iterator_type(template: &str, config: &Configuration) -> String {
    let byte_order = match config.byte_order {
        ByteOrder::None => "byte_order::none",
        ByteOrder::Msb0 => "byte_order::msb0",
        ByteOrder::Lsb0 => "byte_order::lsb0",
    };
    let inner = format!(
        "{template}<bit_order::{},{},{byte_order}>",
        config.bit_order.as_str(),
        unit_type(config)
    );
    match config.shape {
        IteratorShape::Forward => inner,
        IteratorShape::Reverse => format!("std::reverse_iterator<\n                   {inner}>"),
    }
}

/// Break a quoted string literal into adjacent literals so no line exceeds
/// `column`, continuing lines at `indent` spaces.
///
/// Breaks go after the last space that fits. A literal with no usable space
/// is left unbroken.
pub fn wrap_literal(literal: &str, indent: usize, column: usize) -> String {
    let max_len = column.saturating_sub(indent).max(2);
    let mut out = String::new();
    let mut rest = literal.to_string();

    while rest.len() > max_len {
        let split = rest[..max_len - 1]
            .rfind(' ')
            .or_else(|| rest[max_len - 1..].find(' ').map(|i| i + max_len - 1));
        let Some(split) = split else {
            break;
        };
        out.push_str(&rest[..=split]);
        out.push_str("\"\n");
        out.push_str(&" ".repeat(indent));
        rest = format!("\"{}", &rest[split + 1..]);
    }

    out.push_str(&rest);
    out
}
