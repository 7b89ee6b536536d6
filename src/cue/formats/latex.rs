//! LaTeX cue sheet rendering
//!
//!     A route becomes one `supertabular` row per entry, wrapped in a fixed preamble and
//!     footer. The table has four columns: Go (the instruction glyph), At (absolute
//!     distance), On (description and note) and For (distance to the next cue).
//!
//!     Every user-supplied string is escaped before the emphasis markup is resolved, so
//!     riders can bold or italicize text but cannot inject LaTeX commands.

use super::registry::{FormatError, Formatter};
use crate::cue::config::RenderConfig;
use crate::cue::inlines;
use crate::cue::model::{Entry, Route};
use crate::cue::vocabulary::{Color, Instruction, Modifier};

const PACKAGES: &str = r"\usepackage[left=0.20in,right=0.20in,top=0.7in,bottom=0.25in]{geometry}
\geometry{letterpaper}
\usepackage{colortbl}
\usepackage{supertabular}
\usepackage{amsmath}
\usepackage{helvet}
\usepackage{fourier}
\usepackage{bbding}
\usepackage[alpine]{ifsym}
\usepackage{fancyhdr}
\usepackage{lastpage}

\pagestyle{fancy}
\fancyhf{}
";

const PAGE_SETUP: &str = r"\fancyfoot[C]{\footnotesize{\emph{Page~\thepage~of~\pageref{LastPage}}}}
\setlength{\footskip}{0.0in}
\setlength{\headsep}{0.2in}

\renewcommand{\familydefault}{\sfdefault}

\begin{document}
\renewcommand{\arraystretch}{1.15}
";

const TABLE_START: &str = r"\tablehead{
  \hline
  \rowcolor[gray]{0}
  \textbf{\textcolor{white}{Go}} &
  \textbf{\textcolor{white}{At}} &
  \textbf{\textcolor{white}{On}} &
  \textbf{\textcolor{white}{For}} \\
  \hline
}
\tabletail{\hline}
\tablelasttail{\hline}
\begin{center}
  \begin{supertabular}{|c|p{0.30in}|p{2.25in}|l|}
  \hline
";

/// Closes the table and the document.
pub const FOOTER: &str = r"\end{supertabular}
\end{center}
\end{document}
";

/// Escape characters that would otherwise be interpreted by LaTeX.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str(r"\textbackslash "),
            '$' | '#' | '&' | '%' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            '|' => out.push_str("$|$"),
            '<' => out.push_str("$<$"),
            '>' => out.push_str(r"$\Rightarrow$"),
            _ => out.push(ch),
        }
    }
    out
}

fn climb(label: &str) -> String {
    format!(r"$\underset{{\textbf{{{label}}}}}{{\text{{\large \Mountain}}}}$")
}

/// The "Go" column content for an instruction.
pub fn instruction_glyph(instruction: &Instruction, modifier: Modifier) -> String {
    if let Some(label) = instruction.climb_label() {
        return climb(label);
    }
    match instruction {
        Instruction::Summit => climb("top"),
        Instruction::Danger => r"\Large \danger ".to_string(),
        Instruction::FirstAid => r"\raisebox{-0.15em}{\Plus} ".to_string(),
        _ => format!(
            r"\textbf{{{}{}}}",
            escape(modifier.code()),
            escape(instruction.code())
        ),
    }
}

/// The `\rowcolor` spec for a color, if it has one.
pub fn row_color(color: Color, gray_level: f64) -> Option<String> {
    match color {
        Color::None => None,
        Color::Gray => Some(format!("[gray]{{{gray_level}}}")),
        Color::Yellow => Some("{yellow}".to_string()),
    }
}

/// Render a single table row.
pub fn entry_to_latex(entry: &Entry, config: &RenderConfig) -> String {
    let color_str = row_color(entry.color, config.gray_level)
        .map(|color| format!(r"\rowcolor{color}"))
        .unwrap_or_default();

    let esc_description = escape(&entry.description);
    let note_str = if entry.note.is_empty() {
        String::new()
    } else if esc_description.trim().is_empty() {
        // A note without a description takes the description's place
        escape(&entry.note)
    } else {
        format!(r" \newline \textbf{{Note:}} {}", escape(&entry.note))
    };
    let for_str = entry
        .for_distance
        .map(|distance| format!("{distance:5.1}"))
        .unwrap_or_default();

    format!(
        r"{} {} & {:5.1} & {}{} & {} \\ \hline",
        color_str,
        instruction_glyph(&entry.instruction, entry.modifier),
        entry.absolute_distance,
        inlines::format(&esc_description),
        inlines::format(&note_str),
        for_str
    )
}

/// Length, plus the elevation gain when the route has any.
fn route_stats(route: &Route) -> String {
    match route.elevation_gain_ft {
        Some(gain) if gain != 0.0 => {
            format!("{:.1} mi / {} ft", route.length_mi, gain as i64)
        }
        _ => format!("{:.1} mi", route.length_mi),
    }
}

/// Everything from `\documentclass` to the first table row.
pub fn header(route: &Route, config: &RenderConfig) -> String {
    let stats = route_stats(route);
    let mut rhead = format!(r"\emph{{Route \#{}}}", escape(&route.id));
    let lhead = match &route.name {
        Some(name) => Some(format!(r"\emph{{{} ({stats})}}", escape(name))),
        None => {
            rhead.push_str(&format!(r" \emph{{({stats})}}"));
            None
        }
    };

    let mut out = format!("\\documentclass[{}]{{article}}\n", config.font_size);
    out.push_str(PACKAGES);
    if let Some(lhead) = lhead {
        out.push_str(&format!("\\lhead{{\\small {lhead}}}\n"));
    }
    out.push_str(&format!("\\rhead{{\\small {rhead}}}\n"));
    out.push_str(PAGE_SETUP);
    if config.two_column {
        out.push_str("\\twocolumn\n");
    }
    out.push_str(TABLE_START);
    out
}

/// Render a full document with the given settings.
pub fn render_with(route: &Route, config: &RenderConfig) -> String {
    let mut out = header(route, config);
    for entry in &route.entries {
        out.push_str(&entry_to_latex(entry, config));
        out.push('\n');
    }
    out.push_str(FOOTER);
    out
}

/// Render a full document with the default settings.
pub fn render(route: &Route) -> String {
    render_with(route, &RenderConfig::default())
}

/// Formatter for the printable LaTeX cue sheet.
#[derive(Debug, Clone, Default)]
pub struct LatexFormatter {
    config: RenderConfig,
}

impl LatexFormatter {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Formatter for LatexFormatter {
    fn name(&self) -> &str {
        "latex"
    }

    fn serialize(&self, route: &Route) -> Result<String, FormatError> {
        route
            .validate()
            .map_err(|e| FormatError::SerializationError(e.to_string()))?;
        Ok(render_with(route, &self.config))
    }

    fn description(&self) -> &str {
        "LaTeX cue sheet document"
    }
}
