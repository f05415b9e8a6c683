//! Helpers for building assembly text one line at a time.
//! Every instruction or directive is `\t<mnemonic>\t<operands joined by ", ">`.

pub fn asm_line(mnemonic: &str, operands: &[&str]) -> String {
    if operands.is_empty() {
        format!("\t{}", mnemonic)
    } else {
        format!("\t{}\t{}", mnemonic, operands.join(", "))
    }
}

pub fn label_line(label: &str) -> String {
    format!("{}:", label)
}

/// Join finished lines into a file, newline-terminated
pub fn join_lines(lines: &[String]) -> String {
    let mut output = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        output.push_str(line);
        output.push('\n');
    }
    output
}
