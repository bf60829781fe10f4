//! The translation unit that runs every generated entry point.

use std::fmt::Write as FmtWrite;

use quickcopy_corpus::Role;

use crate::suite::{entry_name, Constness};

/// Render the bandit `main` file declaring and registering the entry point
/// of every (constness, role) combination, grouped by constness.
pub fn render_driver(header: &str, range_count: usize, roles: &[Role]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#include <bandit/bandit.h>");
    let _ = writeln!(out, "using namespace bandit;");
    let _ = writeln!(out);
    let _ = writeln!(out, "#include \"{header}\"");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "constexpr std::array<for_each_quicktest_range::test_range, {range_count}>"
    );
    let _ = writeln!(out, "    for_each_quicktest_range::ranges;");
    let _ = writeln!(out);

    for constness in Constness::ALL {
        for &role in roles {
            let _ = writeln!(out, "void {}();", entry_name(constness, role));
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "go_bandit([] {{");
    for constness in Constness::ALL {
        let _ = writeln!(
            out,
            "    describe(\"copying from a {}\", [] {{",
            constness.iterator_template()
        );
        for &role in roles {
            let _ = writeln!(out, "        {}();", entry_name(constness, role));
        }
        let _ = writeln!(out, "    }});");
    }
    let _ = writeln!(out, "}});");
    let _ = writeln!(out);
    let _ = writeln!(out, "int main(int argc, char** argv)");
    let _ = writeln!(out, "{{");
    let _ = writeln!(out, "    return bandit::run(argc, argv);");
    let _ = writeln!(out, "}}");

    out
}
