//! List rules command implementation.

use protolint_core::RuleRegistry;

/// Runs the list-rules command.
pub fn run(registry: &RuleRegistry) {
    println!("Available rules:\n");
    println!("{:<42} {:<12} Description", "Name", "Kind");
    println!("{}", "-".repeat(96));

    for registered in registry.all() {
        let rule = registered.rule();
        println!(
            "{:<42} {:<12} {}",
            registered.name().as_str(),
            rule.kind().to_string(),
            rule.description()
        );
    }

    println!("\nDisable a rule or a whole namespace, e.g.:");
    println!("  protolint lint --disable-rule core::naming::lower_snake ...");
    println!("  // (-- api-linter: core::naming=disabled --)");
}
