#![no_main]

use bnf_ide::highlight_line;
use bnf_syntax::{parse, tokenize};
use libfuzzer_sys::fuzz_target;

const MAX_LINE_BYTES: usize = 4096;

fuzz_target!(|data: &[u8]| {
    let line = &data[..data.len().min(MAX_LINE_BYTES)];

    let ast = parse(line);
    assert_eq!(ast.is_strict(), ast.diagnostic().is_none());
    assert_eq!(ast, parse(line));

    let _ = tokenize(line);
    let _ = highlight_line(0, &ast);
});
