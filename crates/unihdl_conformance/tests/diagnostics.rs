//! Notices, faults and parser recovery as seen from the whole pipeline.

use unihdl_config::{ConvertConfig, NoticeLevel};
use unihdl_conformance::{translate_sv, translate_sv_multifile, translate_sv_with_config};
use unihdl_diagnostics::Severity;
use unihdl_sv_convert::errors::{E300, W300};
use unihdl_sv_parser::lexer::LEX_ERROR;
use unihdl_sv_parser::parser::PARSE_ERROR;

#[test]
fn attribute_instances_warn_and_translation_continues() {
    let result = translate_sv(
        "module top;\n  foo f1((* keep *) .a(x), (* dont_touch = 1 *) .b(y));\nendmodule\n",
    );
    assert!(!result.has_errors);
    assert_eq!(result.warning_count, 2);
    assert!(result.diagnostics.iter().all(|d| d.code == W300));
    assert!(result.diagnostics[0]
        .message
        .starts_with("construct not implemented: attribute instance"));

    let inst = &result.module("top").expect("module top").instances[0];
    assert_eq!(inst.port_map.len(), 2);
    assert_eq!(result.show(&inst.port_map[1]), "MAP(b, y)");
}

#[test]
fn notices_can_be_downgraded_to_notes() {
    let config = ConvertConfig {
        notice_severity: NoticeLevel::Note,
    };
    let result = translate_sv_with_config(
        "module top;\n  foo #(.T(bit signed [3:0])) f1((* keep *) x);\nendmodule\n",
        &config,
    );
    assert_eq!(result.diagnostics.len(), 2);
    assert_eq!(result.warning_count, 0);
    assert!(result
        .diagnostics
        .iter()
        .all(|d| d.code == W300 && d.severity == Severity::Note));
    let inst = &result.module("top").expect("module top").instances[0];
    assert_eq!(result.show(&inst.generic_map[0]), "MAP(T, bit[3:0])");
}

#[test]
fn broken_statement_does_not_stop_the_module() {
    let result = translate_sv(
        "module top;\n  good a(.p(x));\n  broken b(.p(;\n  good c(.p(z));\nendmodule\n",
    );
    assert!(result.has_errors);
    assert!(result.diagnostics.iter().any(|d| d.code == PARSE_ERROR));
    assert_eq!(
        result
            .diagnostics
            .iter()
            .filter(|d| d.code == E300)
            .count(),
        1
    );
    let names: Vec<_> = result
        .module("top")
        .expect("module top")
        .instances
        .iter()
        .map(|i| result.show(&i.name))
        .collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn mixed_port_styles_are_rejected_by_the_parser() {
    let result = translate_sv("module top;\n  foo f1(.a(x), y);\n  bar f2(y);\nendmodule\n");
    assert!(result.has_errors);
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.message.contains("cannot mix ordered and named port connections")));
    let insts = &result.module("top").expect("module top").instances;
    assert_eq!(insts.len(), 1);
    assert_eq!(result.show(&insts[0].module_id), "bar");
}

#[test]
fn unsupported_module_items_are_skipped() {
    let result = translate_sv(
        "module top;\n  assign y = a & b;\n  foo f1(.a(y));\nendmodule\n\
         module next;\n  bar b1();\nendmodule\n",
    );
    assert!(!result.has_errors, "{}", result.render_diagnostics());
    assert_eq!(result.warning_count, 1);
    assert_eq!(result.diagnostics[0].code, W300);
    assert_eq!(result.modules.len(), 2);
    assert_eq!(result.module("top").expect("top").instances.len(), 1);
    assert_eq!(result.module("next").expect("next").instances.len(), 1);
}

#[test]
fn realistic_module_body_keeps_only_instances() {
    let result = translate_sv(
        "module top(input logic clk, rst);\n\
         \x20 logic [7:0] d;\n\
         \x20 typedef struct packed { logic a; } pair_t;\n\
         \x20 assign d = 0;\n\
         \x20 always_ff @(posedge clk) begin\n\
         \x20   if (rst) d <= '0;\n\
         \x20   else d <= d + 1;\n\
         \x20 end\n\
         \x20 task t();\n\
         \x20 endtask\n\
         \x20 function int f(int x); return x; endfunction\n\
         \x20 counter #(.W(8)) u_cnt(.clk, .rst, .q(d));\n\
         endmodule\n",
    );
    assert!(!result.has_errors, "{}", result.render_diagnostics());
    assert!(result.diagnostics.iter().all(|d| d.code == W300));
    assert_eq!(result.warning_count, 6);
    let insts = &result.module("top").expect("module top").instances;
    assert_eq!(insts.len(), 1);
    assert_eq!(result.show(&insts[0].name), "u_cnt");
}

#[test]
fn fill_literals_in_connections() {
    let result = translate_sv("module top;\n  foo f1(.rst('0), .en('1), .d('z));\nendmodule\n");
    assert!(!result.has_errors, "{}", result.render_diagnostics());
    let inst = &result.module("top").expect("module top").instances[0];
    let ports: Vec<_> = inst.port_map.iter().map(|e| result.show(e)).collect();
    assert_eq!(ports, vec!["MAP(rst, '0)", "MAP(en, '1)", "MAP(d, 'z)"]);
}

#[test]
fn oversized_literal_width_is_a_lexical_error() {
    let result = translate_sv(
        "module top;\n  foo #(5000000000'h1) f1();\n  bar b1();\nendmodule\n",
    );
    assert!(result.has_errors);
    let lex: Vec<_> = result
        .diagnostics
        .iter()
        .filter(|d| d.code == LEX_ERROR)
        .collect();
    assert_eq!(lex.len(), 1);
    assert_eq!(lex[0].message, "literal width does not fit in 32 bits");
    assert_eq!(result.source_db.snippet(lex[0].primary_span), "5000000000'h1");
    let insts = &result.module("top").expect("module top").instances;
    assert_eq!(insts.len(), 1);
    assert_eq!(result.show(&insts[0].module_id), "bar");
}

#[test]
fn diagnostics_are_ordered_by_file_and_offset() {
    let sources: Vec<(String, String)> = (0..16)
        .map(|i| {
            (
                format!("f{i}.sv"),
                format!(
                    "module m{i};\n  a u((* k *) .p(x));\n  b v(.p(;\n\
                     \x20 c w((* k *) .p(y));\nendmodule\n"
                ),
            )
        })
        .collect();
    let files: Vec<(&str, &str)> = sources
        .iter()
        .map(|(n, s)| (n.as_str(), s.as_str()))
        .collect();
    let expected: Vec<_> = {
        let first = translate_sv_multifile(&files, &ConvertConfig::default());
        first
            .diagnostics
            .iter()
            .map(|d| (d.code, d.primary_span.file, d.primary_span.start))
            .collect()
    };
    for window in expected.windows(2) {
        let (a, b) = (window[0], window[1]);
        assert!((a.1.as_raw(), a.2) <= (b.1.as_raw(), b.2), "{a:?} before {b:?}");
    }
    for _ in 0..4 {
        let again = translate_sv_multifile(&files, &ConvertConfig::default());
        let order: Vec<_> = again
            .diagnostics
            .iter()
            .map(|d| (d.code, d.primary_span.file, d.primary_span.start))
            .collect();
        assert_eq!(order, expected);
    }
}

#[test]
fn rendered_output_names_file_and_code() {
    let result = translate_sv("module top;\n  foo f1((* keep *) .a(x));\nendmodule\n");
    let rendered = result.render_diagnostics();
    assert!(rendered.contains("warning[W300]"), "{rendered}");
    assert!(rendered.contains("test.sv:2:"), "{rendered}");
}
