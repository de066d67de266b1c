use sealcheck_enforce::types::{Diagnostic, FactEntry};

pub(crate) fn format_diagnostic_human(d: &Diagnostic) -> String {
    format!("{}:{}:{}: {}\n", d.file, d.line, d.column, d.message)
}

pub(crate) fn format_fact_human(f: &FactEntry) -> String {
    let variants: Vec<String> = f.variants.iter().map(|v| v.to_string()).collect();
    let mut out = format!(
        "{}.{} [{}]\n  --> {}:{}\n   = discriminator: {}\n",
        f.module_name, f.contract.name, f.fingerprint, f.file, f.line, f.discriminator,
    );
    if variants.is_empty() {
        out.push_str("   = variants: (none)\n");
    } else {
        out.push_str(&format!("   = variants: {}\n", variants.join(", ")));
    }
    out
}
