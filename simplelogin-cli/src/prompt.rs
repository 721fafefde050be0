// simplelogin-cli/src/prompt.rs
use crate::output::suffix_label;
use console::Term;
use dialoguer::Input;
use simplelogin_client::{SuffixOption, SuffixSelector};
use std::io;

/// Lists the suffixes on stderr and reads a 1-based pick from the terminal
pub struct TerminalSelector;

impl SuffixSelector for TerminalSelector {
    fn select(&mut self, options: &[SuffixOption]) -> io::Result<String> {
        let term = Term::stderr();
        term.write_line("Available suffixes:")?;
        for (i, s) in options.iter().enumerate() {
            term.write_line(&format!("  {:2}) {}", i + 1, suffix_label(s)))?;
        }

        Input::<String>::new()
            .with_prompt(format!("Pick a suffix [1-{}]", options.len()))
            .interact_text_on(&term)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
    }
}
