//! Specialized completers for the non-filesystem domains.
//!
//! Each completer filters its vocabulary by the typed text, appends the
//! survivors to the session, finalizes one group, and appends the literal
//! typed text as the echo entry. Case rules differ by domain: keyword
//! vocabularies (history kinds, highlight attributes, styles, colors) match
//! case-insensitively, identifier vocabularies (variables, functions,
//! environment, accounts) match exactly, and filesystem-derived vocabularies
//! (color schemes, opener programs) follow the platform's file-name case
//! rules.

use crate::config::{
    COLOR_NAMES, HIGHLIGHT_ATTRS, HISTORY_KINDS, INVERT_KINDS, LIGHT_COLOR_NAMES, STYLE_NAMES,
    WINRUN_MARKERS,
};
use crate::models::{
    extract_cmd_name, CompletionCx, EnvSource, IdentityDb, MatchSession, OpenerSource, Vocabulary,
};
use crate::utils::escape::escape_chars;
use crate::utils::str::{keyword_prefix_matches, os_prefix_matches};

// =============================================================================
// Keyword Vocabularies
// =============================================================================

/// Complete `text` against a fixed keyword list, case-insensitively.
pub fn complete_from_keyword_list(text: &str, list: &[&str], session: &mut MatchSession) {
    for item in list {
        if keyword_prefix_matches(item, text) {
            session.add_match(*item);
        }
    }
    session.finish_group();
    session.add_echo_match(text);
}

/// `:history` kind keywords.
pub fn complete_history(text: &str, session: &mut MatchSession) {
    complete_from_keyword_list(text, HISTORY_KINDS, session);
}

/// `:invert` target flags.
pub fn complete_invert(text: &str, session: &mut MatchSession) {
    complete_from_keyword_list(text, INVERT_KINDS, session);
}

/// `:winrun` window markers.
pub fn complete_winrun(text: &str, session: &mut MatchSession) {
    complete_from_keyword_list(text, WINRUN_MARKERS, session);
}

// =============================================================================
// Options, Variables, Functions
// =============================================================================

/// Option names for `:set`. Value completion after `=` belongs to the
/// option engine, so the completer declines past an assignment and leaves
/// only the echo entry. Returns the splice offset within the argument.
pub fn complete_options(arg: &str, options: &dyn Vocabulary, session: &mut MatchSession) -> usize {
    if let Some(eq) = arg.find('=') {
        session.finish_group();
        session.add_echo_match(&arg[eq + 1..]);
        return eq + 1;
    }
    for name in options.names() {
        if name.starts_with(arg) {
            session.add_match(name);
        }
    }
    session.finish_group();
    session.add_echo_match(arg);
    0
}

/// Option names referenced as `&opt` inside an expression.
pub fn complete_real_option_names(
    prefix: &str,
    options: &dyn Vocabulary,
    session: &mut MatchSession,
) {
    for name in options.names() {
        if name.starts_with(prefix) {
            session.add_match(name);
        }
    }
    session.finish_group();
    session.add_echo_match(prefix);
}

/// Variable names. The vocabulary yields names with the `$` sigil, and the
/// typed prefix includes it, so candidates replace the sigil too.
pub fn complete_variables(prefix: &str, variables: &dyn Vocabulary, session: &mut MatchSession) {
    for name in variables.names() {
        if name.starts_with(prefix) {
            session.add_match(name);
        }
    }
    session.finish_group();
    session.add_echo_match(prefix);
}

/// Builtin function names of the expression engine.
pub fn complete_functions(prefix: &str, functions: &dyn Vocabulary, session: &mut MatchSession) {
    for name in functions.names() {
        if name.starts_with(prefix) {
            session.add_match(name);
        }
    }
    session.finish_group();
    session.add_echo_match(prefix);
}

// =============================================================================
// Help
// =============================================================================

/// `:help` topics, matched by substring. Produces nothing at all - no group,
/// no echo - when help is not backed by the external viewer's topic tags.
pub fn complete_help(text: &str, cx: &CompletionCx<'_>, session: &mut MatchSession) {
    if !cx.vim_help {
        return;
    }
    for tag in cx.help_tags.names() {
        if tag.contains(text) {
            session.add_match(tag);
        }
    }
    session.finish_group();
    session.add_echo_match(text);
}

// =============================================================================
// Accounts
// =============================================================================

/// User account names.
pub fn complete_user_name(text: &str, identity: &dyn IdentityDb, session: &mut MatchSession) {
    for name in identity.user_names() {
        if name.starts_with(text) {
            session.add_match(name);
        }
    }
    session.finish_group();
    session.add_echo_match(text);
}

/// Group names.
pub fn complete_group_name(text: &str, identity: &dyn IdentityDb, session: &mut MatchSession) {
    for name in identity.group_names() {
        if name.starts_with(text) {
            session.add_match(name);
        }
    }
    session.finish_group();
    session.add_echo_match(text);
}

/// `:chown` `user[:group]` argument: without a colon the whole text is a
/// user-name prefix; with one, the text after it completes independently as
/// a group name. Returns the splice offset within `args`.
pub fn complete_chown(args: &str, cx: &CompletionCx<'_>, session: &mut MatchSession) -> usize {
    match args.find(':') {
        None => {
            complete_user_name(args, cx.identity, session);
            0
        }
        Some(colon) => {
            complete_group_name(&args[colon + 1..], cx.identity, session);
            colon + 1
        }
    }
}

// =============================================================================
// Openers
// =============================================================================

/// Opener programs for the file under the cursor: the association table
/// first, then content-sniffing handlers, all in one group.
pub fn complete_filetype(text: &str, cx: &CompletionCx<'_>, session: &mut MatchSession) {
    complete_progs(text, &cx.associations.programs_for(cx.current_file), session);
    complete_progs(text, &cx.magic_handlers.programs_for(cx.current_file), session);
    session.finish_group();
    session.add_echo_match(text);
}

/// Extract the program name from each specification and add the ones the
/// typed text prefixes. `|` separates alternatives in the association
/// syntax, so it is escaped in candidates.
fn complete_progs(text: &str, programs: &[String], session: &mut MatchSession) {
    for spec in programs {
        let (command, _) = extract_cmd_name(spec);
        if os_prefix_matches(&command, text) {
            session.add_match(escape_chars(&command, "|"));
        }
    }
}

// =============================================================================
// Highlighting
// =============================================================================

/// `:highlight` group names.
pub fn complete_highlight_groups(
    text: &str,
    groups: &dyn Vocabulary,
    session: &mut MatchSession,
) {
    for name in groups.names() {
        if keyword_prefix_matches(&name, text) {
            session.add_match(name);
        }
    }
    session.finish_group();
    session.add_echo_match(text);
}

/// One `:highlight` attribute argument, a two-level completion:
///
/// - before `=`: attribute names (`cterm`, `ctermfg`, `ctermbg`);
/// - after `cterm=`: style keywords, where a trailing comma starts a new
///   element of the style list and only the last element is completed;
/// - after any other attribute: color names plus the `default`/`none`
///   sentinels.
///
/// Returns the splice offset within `arg`, pointing at the sub-segment the
/// candidates replace.
pub fn complete_highlight_arg(arg: &str, session: &mut MatchSession) -> usize {
    let Some(eq) = arg.find('=') else {
        for attr in HIGHLIGHT_ATTRS {
            if keyword_prefix_matches(attr, arg) {
                session.add_match(*attr);
            }
        }
        session.finish_group();
        session.add_echo_match(arg);
        return 0;
    };

    let attr = &arg[..eq];
    let mut value = &arg[eq + 1..];
    let mut result = eq + 1;

    if attr == "cterm" {
        if let Some(comma) = value.rfind(',') {
            result += comma + 1;
            value = &value[comma + 1..];
        }
        for style in STYLE_NAMES {
            if keyword_prefix_matches(style, value) {
                session.add_match(*style);
            }
        }
    } else {
        if keyword_prefix_matches("default", value) {
            session.add_match("default");
        }
        if keyword_prefix_matches("none", value) {
            session.add_match("none");
        }
        for color in COLOR_NAMES.iter().chain(LIGHT_COLOR_NAMES) {
            if keyword_prefix_matches(color, value) {
                session.add_match(*color);
            }
        }
    }
    session.finish_group();
    session.add_echo_match(value);
    result
}

// =============================================================================
// Environment and Color Schemes
// =============================================================================

/// Environment variable names, completed after a `$`.
pub fn complete_envvar(text: &str, env: &dyn EnvSource, session: &mut MatchSession) {
    for (name, _) in env.vars() {
        if name.starts_with(text) {
            session.add_match(name);
        }
    }
    session.finish_group();
    session.add_echo_match(text);
}

/// Declared color-scheme names; schemes are files, so matching follows the
/// platform's file-name case rules.
pub fn complete_colorschemes(
    text: &str,
    colorschemes: &dyn Vocabulary,
    session: &mut MatchSession,
) {
    for name in colorschemes.names() {
        if os_prefix_matches(&name, text) {
            session.add_match(name);
        }
    }
    session.finish_group();
    session.add_echo_match(text);
}
