//! Note annotation parser: one string, two projections.
//!
//! A node's note is a plain line sequence. Lines starting with `[ ]` or
//! `[x]` are tasks; every other line belongs to the free text. There is no
//! separate task-list structure anywhere: toggling or retitling a task
//! rewrites its line in place, and free-text edits never touch task lines.
//! Keeping the string canonical is what prevents the two views from
//! desyncing.

use winnow::combinator::delimited;
use winnow::prelude::*;
use winnow::token::one_of;

/// One parsed task line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Everything after the 4th character of the line.
    pub text: String,
    pub completed: bool,
}

/// The two projections of a note string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteContent {
    /// Non-task lines, in order, joined with `\n`.
    pub free_text: String,
    /// Task lines, in order.
    pub tasks: Vec<Task>,
}

/// `[ ]` or `[x]` at the start of a line. Yields the completion flag.
fn task_marker(input: &mut &str) -> ModalResult<bool> {
    delimited('[', one_of([' ', 'x']), ']')
        .map(|c| c == 'x')
        .parse_next(input)
}

fn parse_task_line(line: &str) -> Option<Task> {
    let mut rest = line;
    let completed = task_marker.parse_next(&mut rest).ok()?;
    Some(Task {
        text: line.get(4..).unwrap_or("").to_string(),
        completed,
    })
}

fn is_task_line(line: &str) -> bool {
    let mut rest = line;
    task_marker.parse_next(&mut rest).is_ok()
}

/// Split a note into its free-text and task projections.
pub fn parse(note: &str) -> NoteContent {
    let mut free_lines: Vec<&str> = Vec::new();
    let mut tasks = Vec::new();

    for line in note.split('\n') {
        match parse_task_line(line) {
            Some(task) => tasks.push(task),
            None => free_lines.push(line),
        }
    }

    NoteContent {
        free_text: free_lines.join("\n"),
        tasks,
    }
}

/// Rewrite the `index`-th task line with a new completion marker.
/// Every other line is returned byte-identical.
pub fn set_task_completion(note: &str, index: usize, completed: bool) -> String {
    rewrite_task_line(note, index, |line, _| {
        let marker = if completed { "[x]" } else { "[ ]" };
        format!("{marker}{}", line.get(3..).unwrap_or(""))
    })
}

/// Replace the `index`-th task's text, keeping its completion marker.
pub fn set_task_text(note: &str, index: usize, new_text: &str) -> String {
    rewrite_task_line(note, index, |_, completed| {
        let marker = if completed { "[x]" } else { "[ ]" };
        format!("{marker} {new_text}")
    })
}

fn rewrite_task_line(note: &str, index: usize, rewrite: impl Fn(&str, bool) -> String) -> String {
    let mut task_seen = 0usize;
    let lines: Vec<String> = note
        .split('\n')
        .map(|line| match parse_task_line(line) {
            Some(task) => {
                let current = task_seen;
                task_seen += 1;
                if current == index {
                    rewrite(line, task.completed)
                } else {
                    line.to_string()
                }
            }
            None => line.to_string(),
        })
        .collect();
    lines.join("\n")
}

/// Replace the free-text projection with `new_free_text`, leaving every
/// task line untouched and in relative order.
///
/// The i-th free line is replaced by the i-th new line; surplus new lines
/// are inserted after the last free line (or at the top when the note had
/// none); surplus old free lines are dropped.
pub fn set_free_text(note: &str, new_free_text: &str) -> String {
    let mut new_lines = new_free_text.split('\n');
    let mut out: Vec<String> = Vec::new();
    // Where surplus free lines get spliced in.
    let mut insert_at = 0usize;

    for line in note.split('\n') {
        if is_task_line(line) {
            out.push(line.to_string());
        } else if let Some(replacement) = new_lines.next() {
            out.push(replacement.to_string());
            insert_at = out.len();
        }
        // Old free line with no replacement left: dropped.
    }

    for extra in new_lines {
        out.insert(insert_at, extra.to_string());
        insert_at += 1;
    }

    out.join("\n")
}

/// Append a fresh unchecked task line and return its index.
///
/// This backs the `[`-key trigger in the note editor: the typed `[` is
/// swallowed by the caller and a new empty task appears instead, ready to
/// be focused for editing.
pub fn begin_task(note: &str) -> (String, usize) {
    let index = parse(note).tasks.len();
    (format!("{note}\n[ ] "), index)
}
