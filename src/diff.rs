//! Unified diff generation.
//!
//! Renders the difference between the current and canonical line sequences
//! in the classic unified format: `---`/`+++` labels and `@@` hunks with
//! three lines of context, with `difflib`-style range arithmetic so the
//! suggested-change text matches what Python tooling produces.

/// Context lines around each hunk.
const CONTEXT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpKind {
    Equal,
    Delete,
    Insert,
    Replace,
}

/// One edit-script span over both sequences.
#[derive(Debug, Clone, Copy)]
struct Op {
    kind: OpKind,
    a_start: usize,
    a_end: usize,
    b_start: usize,
    b_end: usize,
}

/// Render a unified diff between two line sequences.
///
/// Returns an empty string when the sequences are identical.
pub fn unified_diff(a: &[String], b: &[String], from_label: &str, to_label: &str) -> String {
    let groups = grouped_opcodes(a, b, CONTEXT);
    if groups.is_empty() {
        return String::new();
    }

    let mut lines = Vec::new();
    lines.push(format!("--- {}", from_label));
    lines.push(format!("+++ {}", to_label));

    for group in &groups {
        let first = &group[0];
        let last = &group[group.len() - 1];
        lines.push(format!(
            "@@ -{} +{} @@",
            format_range(first.a_start, last.a_end),
            format_range(first.b_start, last.b_end)
        ));

        for op in group {
            match op.kind {
                OpKind::Equal => {
                    lines.extend(a[op.a_start..op.a_end].iter().map(|l| format!(" {}", l)));
                }
                OpKind::Delete => {
                    lines.extend(a[op.a_start..op.a_end].iter().map(|l| format!("-{}", l)));
                }
                OpKind::Insert => {
                    lines.extend(b[op.b_start..op.b_end].iter().map(|l| format!("+{}", l)));
                }
                OpKind::Replace => {
                    lines.extend(a[op.a_start..op.a_end].iter().map(|l| format!("-{}", l)));
                    lines.extend(b[op.b_start..op.b_end].iter().map(|l| format!("+{}", l)));
                }
            }
        }
    }

    lines.join("\n")
}

/// Format a hunk range the way `difflib` does: 1-based start, length
/// omitted when it is 1, and a zero-length range anchored on the line
/// before its position.
fn format_range(start: usize, end: usize) -> String {
    let length = end - start;
    if length == 1 {
        return format!("{}", start + 1);
    }
    let beginning = if length == 0 { start } else { start + 1 };
    format!("{},{}", beginning, length)
}

/// Full edit script between `a` and `b`.
///
/// The common prefix and suffix are trimmed first so the quadratic matcher
/// only sees the changed region; import reorderings are localized, so the
/// middle stays small.
fn opcodes(a: &[String], b: &[String]) -> Vec<Op> {
    let mut prefix = 0;
    while prefix < a.len() && prefix < b.len() && a[prefix] == b[prefix] {
        prefix += 1;
    }
    let mut suffix = 0;
    while suffix < a.len() - prefix
        && suffix < b.len() - prefix
        && a[a.len() - 1 - suffix] == b[b.len() - 1 - suffix]
    {
        suffix += 1;
    }

    let mut ops = Vec::new();
    if prefix > 0 {
        ops.push(Op {
            kind: OpKind::Equal,
            a_start: 0,
            a_end: prefix,
            b_start: 0,
            b_end: prefix,
        });
    }

    let mid_a = &a[prefix..a.len() - suffix];
    let mid_b = &b[prefix..b.len() - suffix];
    for op in lcs_opcodes(mid_a, mid_b) {
        ops.push(Op {
            kind: op.kind,
            a_start: op.a_start + prefix,
            a_end: op.a_end + prefix,
            b_start: op.b_start + prefix,
            b_end: op.b_end + prefix,
        });
    }

    if suffix > 0 {
        ops.push(Op {
            kind: OpKind::Equal,
            a_start: a.len() - suffix,
            a_end: a.len(),
            b_start: b.len() - suffix,
            b_end: b.len(),
        });
    }
    ops
}

/// Edit script for the changed region, from a longest-common-subsequence
/// table walked front to back.
fn lcs_opcodes(a: &[String], b: &[String]) -> Vec<Op> {
    let m = a.len();
    let n = b.len();
    if m == 0 && n == 0 {
        return Vec::new();
    }
    if m == 0 {
        return vec![span(OpKind::Insert, 0, 0, 0, n)];
    }
    if n == 0 {
        return vec![span(OpKind::Delete, 0, m, 0, 0)];
    }

    // dp[i][j] = LCS length of a[i..] vs b[j..]
    let mut dp = vec![vec![0u32; n + 1]; m + 1];
    for i in (0..m).rev() {
        for j in (0..n).rev() {
            dp[i][j] = if a[i] == b[j] {
                dp[i + 1][j + 1] + 1
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }

    let mut ops = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < m && j < n {
        if a[i] == b[j] {
            let (ai, bj) = (i, j);
            while i < m && j < n && a[i] == b[j] {
                i += 1;
                j += 1;
            }
            ops.push(span(OpKind::Equal, ai, i, bj, j));
        } else {
            let (ai, bj) = (i, j);
            while i < m && j < n && a[i] != b[j] {
                if dp[i + 1][j] >= dp[i][j + 1] {
                    i += 1;
                } else {
                    j += 1;
                }
            }
            let kind = if ai < i && bj < j {
                OpKind::Replace
            } else if ai < i {
                OpKind::Delete
            } else {
                OpKind::Insert
            };
            ops.push(span(kind, ai, i, bj, j));
        }
    }
    if i < m {
        ops.push(span(OpKind::Delete, i, m, j, j));
    }
    if j < n {
        ops.push(span(OpKind::Insert, i, i, j, n));
    }
    ops
}

fn span(kind: OpKind, a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> Op {
    Op {
        kind,
        a_start,
        a_end,
        b_start,
        b_end,
    }
}

/// Group opcodes into hunks, `difflib.get_grouped_opcodes` style: leading
/// and trailing context is trimmed to `n` lines and an equal run longer
/// than `2n` splits the groups.
fn grouped_opcodes(a: &[String], b: &[String], n: usize) -> Vec<Vec<Op>> {
    let mut codes = opcodes(a, b);
    if codes.is_empty() {
        return Vec::new();
    }

    if let Some(first) = codes.first_mut() {
        if first.kind == OpKind::Equal {
            first.a_start = first.a_start.max(first.a_end.saturating_sub(n));
            first.b_start = first.b_start.max(first.b_end.saturating_sub(n));
        }
    }
    if let Some(last) = codes.last_mut() {
        if last.kind == OpKind::Equal {
            last.a_end = last.a_end.min(last.a_start + n);
            last.b_end = last.b_end.min(last.b_start + n);
        }
    }

    let mut groups: Vec<Vec<Op>> = Vec::new();
    let mut group: Vec<Op> = Vec::new();
    for mut op in codes {
        if op.kind == OpKind::Equal && op.a_end - op.a_start > 2 * n {
            group.push(span(
                OpKind::Equal,
                op.a_start,
                op.a_start + n,
                op.b_start,
                op.b_start + n,
            ));
            groups.push(std::mem::take(&mut group));
            op.a_start = op.a_end - n;
            op.b_start = op.b_end - n;
        }
        group.push(op);
    }
    if !group.is_empty() && !(group.len() == 1 && group[0].kind == OpKind::Equal) {
        groups.push(group);
    }
    groups
}
