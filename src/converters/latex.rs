//! LaTeX document converter.
//!
//! Produces a compilable `article` document with one block per problem
//! and an `\includegraphics` line per attached image.

use super::ProblemConverter;
use crate::error::Result;
use crate::problems::Problem;

const PREAMBLE: &str = r"\documentclass[12pt]{article}
\usepackage{graphicx}
\usepackage{enumitem}
\setlength{\parindent}{0pt}
\begin{document}
\section*{Extracted Contest Problems}
";

/// Renders problems as a LaTeX document.
#[derive(Debug, Clone, Default)]
pub struct LatexConverter;

impl LatexConverter {
    /// Create a converter.
    pub fn new() -> Self {
        Self
    }
}

impl ProblemConverter for LatexConverter {
    fn convert(&self, problems: &[Problem]) -> Result<String> {
        let mut out = String::from(PREAMBLE);

        for problem in problems {
            out.push_str(&format!("\\textbf{{Problem {}}} \\\\\n", problem.number));
            out.push_str(&escape(&problem.text));
            out.push_str("\n\n");
            for image in &problem.images {
                out.push_str(&format!(
                    "\\\\ \\includegraphics[width=0.7\\linewidth]{{{image}}}\n\n"
                ));
            }
            out.push_str("\\vspace{1em}\n\n");
        }

        out.push_str("\\end{document}\n");
        Ok(out)
    }
}

/// Escape the LaTeX specials that show up in contest text.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' | '%' | '#' | '_' | '$' => {
                escaped.push('\\');
                escaped.push(c);
            },
            c => escaped.push(c),
        }
    }
    escaped
}
