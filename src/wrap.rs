//! Column-aware line wrapping for KEGG field content.
//!
//! # Format
//!
//! A KEGG flat-file line is at most 80 columns: a 12-column item field
//! holding the tag (`ENTRY`, `PATHWAY`, ...) followed by 68 columns of data.
//! Data longer than 68 columns is wrapped onto continuation lines whose item
//! field is blank. Where the wrap falls mid-token, the continuation line
//! starts with a `$` marker so the original token can be reconstructed.
//!
//! Each field class wraps with its own rule: reactions prefer to break at
//! `+` and `=` operators, names at spaces and hyphens, indented identifier
//! lists at spaces with a fixed continuation indent, motif descriptions at
//! hyphens only.
//!
//! # Example
//!
//! ```
//! use kegg_enzyme::wrap::{unwrap, wrap_kegg, NAME_WRAP};
//!
//! let name = "retinal dehydrogenase";
//! let wrapped = wrap_kegg(name, &NAME_WRAP);
//! assert_eq!(unwrap(&wrapped, false), name);
//! ```

/// Width of the tag item field at the start of each line
pub const TAG_WIDTH: usize = 12;

/// Total width of a KEGG flat-file line
pub const LINE_WIDTH: usize = 80;

/// Width available to field data on each line
pub const DATA_WIDTH: usize = LINE_WIDTH - TAG_WIDTH;

/// A candidate break strategy within a [`WrapRule`].
///
/// Strategies are tried in order; the first one whose pattern occurs within
/// the width budget wins.
#[derive(Debug, Clone, Copy)]
pub struct BreakRule {
    /// Literal pattern eligible as a break point
    pub pat: &'static str,
    /// Marker prepended to the continuation line (`$` signals a tight rejoin)
    pub marker: &'static str,
    /// Whether the break pattern stays on the line where the break occurred
    pub keep: bool,
    /// Whether the break pattern is carried to the continuation line
    pub trailing: bool,
}

/// A per-field-class wrapping rule: continuation indent, continuation
/// prefix, and an ordered list of candidate break strategies.
#[derive(Debug, Clone, Copy)]
pub struct WrapRule {
    /// Continuation-line indent within the data field
    pub indent: usize,
    /// Fixed prefix inserted on every continuation line
    pub prefix: &'static str,
    /// Break strategies, tried in order
    pub breaks: &'static [BreakRule],
}

/// Wrap rule for REACTION content: prefer breaking around the `+` and `=`
/// operators, fall back to spaces and hyphens with a `$` rejoin marker.
pub static RXN_WRAP: WrapRule = WrapRule {
    indent: 0,
    prefix: "",
    breaks: &[
        BreakRule { pat: " + ", marker: "", keep: true, trailing: true },
        BreakRule { pat: " = ", marker: "", keep: true, trailing: true },
        BreakRule { pat: " ", marker: "$", keep: true, trailing: true },
        BreakRule { pat: "-", marker: "$", keep: true, trailing: true },
    ],
};

/// Wrap rule for name-like content (NAME, SYSNAME, SUBSTRATE, PRODUCT,
/// INHIBITOR, COFACTOR, EFFECTOR): break at spaces or hyphens, always with
/// a `$` rejoin marker.
pub static NAME_WRAP: WrapRule = WrapRule {
    indent: 0,
    prefix: "",
    breaks: &[
        BreakRule { pat: " ", marker: "$", keep: true, trailing: true },
        BreakRule { pat: "-", marker: "$", keep: true, trailing: true },
    ],
};

/// Wrap rule for indented identifier lists (PATHWAY 16, DISEASE 13,
/// GENES 5, COMMENT 0): break at a space, which is dropped at the break and
/// re-inserted on unwrap.
pub const fn id_wrap(indent: usize) -> WrapRule {
    WrapRule {
        indent,
        prefix: "",
        breaks: &[BreakRule { pat: " ", marker: "", keep: true, trailing: false }],
    }
}

/// Wrap rule for STRUCTURES identifier lists: break at the double-space
/// separator between structure ids.
pub const fn struct_wrap(indent: usize) -> WrapRule {
    WrapRule {
        indent,
        prefix: "",
        breaks: &[BreakRule { pat: "  ", marker: "", keep: true, trailing: true }],
    }
}

/// Wrap rule for MOTIF descriptions: hyphen is the sole break point.
pub const fn motif_wrap(indent: usize) -> WrapRule {
    WrapRule {
        indent,
        prefix: "",
        breaks: &[BreakRule { pat: "-", marker: "", keep: true, trailing: true }],
    }
}

// Largest index <= i that sits on a char boundary. KEGG data is ASCII in
// practice, but slicing must not panic on stray multi-byte input.
fn boundary(s: &str, i: usize) -> usize {
    let mut i = i.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Wrap `value` to [`DATA_WIDTH`] columns according to `rule`.
///
/// Lines are joined with `\n`; the continuation indent and rejoin marker of
/// the winning break strategy are prepended to each continuation line. When
/// no break pattern occurs within the budget the remainder is emitted whole,
/// even if over-width; that is an accepted edge case, not an error.
pub fn wrap_kegg(value: &str, rule: &WrapRule) -> String {
    let mut out = String::new();
    let mut line = value.to_string();
    loop {
        if line.len() <= DATA_WIDTH {
            out.push_str(&line);
            return out;
        }
        let mut split = None;
        for br in rule.breaks {
            // A pattern dropped at the break may start right at the budget
            // edge, so the search window widens by its length.
            let mut to = DATA_WIDTH;
            if !br.keep {
                to += br.pat.len();
            }
            if let Some(idx) = line[..boundary(&line, to)].rfind(br.pat) {
                split = Some((br, idx));
                break;
            }
        }
        match split {
            Some((br, mut idx)) => {
                if br.keep && br.trailing {
                    idx += br.pat.len();
                }
                out.push_str(&line[..idx]);
                out.push('\n');
                if !br.trailing {
                    idx += br.pat.len();
                }
                let mut next = " ".repeat(rule.indent);
                next.push_str(rule.prefix);
                next.push_str(br.marker);
                next.push_str(&line[idx..]);
                line = next;
            }
            None => {
                // No eligible break point within budget: emit whole.
                out.push_str(&line);
                return out;
            }
        }
    }
}

/// Reconstruct the single logical line from wrapped continuation lines.
///
/// For each physical line after the first, leading whitespace is stripped;
/// a `$`-prefixed line rejoins the previous one directly (the wrap fell
/// mid-token), any other line rejoins with a single inserted space when
/// `spaced` is set and the text does not already end in one. Single-line
/// input passes through unchanged.
pub fn unwrap(value: &str, spaced: bool) -> String {
    if !value.contains('\n') {
        return value.to_string();
    }
    let mut s = String::new();
    for line in value.split('\n') {
        let l = line.trim_start();
        if let Some(rest) = l.strip_prefix('$') {
            s.push_str(rest);
        } else {
            if spaced && !s.is_empty() && !s.ends_with(' ') {
                s.push(' ');
            }
            s.push_str(l);
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_value_passes_through() {
        assert_eq!(wrap_kegg("alcohol dehydrogenase", &NAME_WRAP), "alcohol dehydrogenase");
        assert_eq!(unwrap("alcohol dehydrogenase", false), "alcohol dehydrogenase");
    }

    #[test]
    fn test_name_wrap_marks_continuation() {
        let name = "very ".repeat(20) + "long";
        let wrapped = wrap_kegg(&name, &NAME_WRAP);
        let cont = wrapped.split('\n').nth(1).unwrap();
        assert!(cont.starts_with('$'), "continuation should carry the rejoin marker: {cont:?}");
    }

    #[test]
    fn test_unwrap_is_inverse_of_name_wrap() {
        let name = "D-glyceraldehyde ".repeat(8) + "dehydrogenase";
        let wrapped = wrap_kegg(&name, &NAME_WRAP);
        assert!(wrapped.contains('\n'));
        assert_eq!(unwrap(&wrapped, false), name);
    }

    #[test]
    fn test_unwrap_is_inverse_of_rxn_wrap() {
        let rxn = "D-glucose 6-phosphate + NADP+ = D-glucono-1,5-lactone 6-phosphate + NADPH + H+";
        let wrapped = wrap_kegg(rxn, &RXN_WRAP);
        assert!(wrapped.contains('\n'));
        assert_eq!(unwrap(&wrapped, false), rxn);
    }

    #[test]
    fn test_unwrap_is_inverse_of_id_wrap() {
        let desc = "component ".repeat(10) + "pathway";
        let wrapped = wrap_kegg(&desc, &id_wrap(16));
        assert!(wrapped.contains('\n'));
        // id_wrap drops the break space; the loose join re-inserts it.
        assert_eq!(unwrap(&wrapped, true), desc);
    }

    #[test]
    fn test_unwrap_is_inverse_of_struct_wrap() {
        let ids = (0..20).map(|i| format!("1AB{i}")).collect::<Vec<_>>().join("  ");
        let wrapped = wrap_kegg(&ids, &struct_wrap(5));
        assert!(wrapped.contains('\n'));
        assert_eq!(unwrap(&wrapped, false), ids);
    }

    #[test]
    fn test_unwrap_is_inverse_of_motif_wrap() {
        let motif = "zinc-containing-".repeat(6) + "dehydrogenases";
        let wrapped = wrap_kegg(&motif, &motif_wrap(13));
        assert!(wrapped.contains('\n'));
        assert_eq!(unwrap(&wrapped, false), motif);
    }

    #[test]
    fn test_wrapped_lines_respect_width() {
        let cases: Vec<(String, WrapRule)> = vec![
            ("alcohol ".repeat(30), NAME_WRAP),
            ("NAD+ + ".repeat(25) + "NADH", RXN_WRAP),
            ("glycolysis ".repeat(20), id_wrap(16)),
            ((0..40).map(|i| format!("1XY{i}")).collect::<Vec<_>>().join("  "), struct_wrap(5)),
            ("iron-sulfur-".repeat(12), motif_wrap(13)),
        ];
        for (value, rule) in &cases {
            for line in wrap_kegg(value, rule).split('\n') {
                assert!(line.len() <= DATA_WIDTH, "line over budget: {line:?}");
            }
        }
    }

    #[test]
    fn test_unbreakable_token_emitted_whole() {
        let token = "x".repeat(DATA_WIDTH + 10);
        assert_eq!(wrap_kegg(&token, &NAME_WRAP), token);
    }

    #[test]
    fn test_rxn_wrap_prefers_operator_break() {
        let rxn = format!("{} + {}", "a".repeat(40), "b".repeat(40));
        let wrapped = wrap_kegg(&rxn, &RXN_WRAP);
        let mut lines = wrapped.split('\n');
        assert!(lines.next().unwrap().ends_with(" + "));
        // Operator breaks need no marker.
        assert!(lines.next().unwrap().starts_with('b'));
    }

    #[test]
    fn test_id_wrap_indents_continuation() {
        let desc = "word ".repeat(20);
        let wrapped = wrap_kegg(desc.trim_end(), &id_wrap(16));
        let cont = wrapped.split('\n').nth(1).unwrap();
        assert!(cont.starts_with(&" ".repeat(16)));
        assert!(!cont[16..].starts_with(' '));
    }

    #[test]
    fn test_unwrap_loose_join_skips_existing_space() {
        // First line already ends in a space: no double space on rejoin.
        assert_eq!(unwrap("alpha \nbeta", true), "alpha beta");
        assert_eq!(unwrap("alpha\nbeta", true), "alpha beta");
        assert_eq!(unwrap("alpha-\n$beta", true), "alpha-beta");
    }
}
