//! Pure path algebra: split, join, extname, absoluteness, and resolution.
//!
//! Nothing here validates a path against the real filesystem; `resolve`
//! reads the process working directory and is otherwise a pure
//! normalization over its inputs. Both platform flavors are compiled
//! unconditionally so either can be exercised (or used for cross-target
//! path reasoning) from any host; the unsuffixed entry points pick the
//! build platform's flavor.

use crate::env;

/// The build platform's path separator.
pub const SEP: char = if cfg!(windows) { '\\' } else { '/' };

/// Whether `c` separates components on the build platform.
pub fn is_sep(c: char) -> bool {
    if cfg!(windows) {
        c == '\\' || c == '/'
    } else {
        c == '/'
    }
}

/// Split a path into `(dirname, basename)`.
///
/// One trailing separator is stripped before searching from the end. A bare
/// root returns the separator itself as dirname and an empty basename; a
/// path with no separator returns `"."` as dirname and the whole input as
/// basename.
pub fn split(path: &str) -> (String, String) {
    let bytes = path.as_bytes();
    if !bytes.is_empty() {
        let mut last_index = bytes.len() - 1;
        if is_sep(bytes[last_index] as char) {
            if last_index == 0 {
                return (path[..1].to_string(), String::new());
            }
            last_index -= 1;
        }
        let mut i = last_index;
        loop {
            if is_sep(bytes[i] as char) {
                let dir_len = if i == 0 { 1 } else { i };
                return (path[..dir_len].to_string(), path[i + 1..].to_string());
            }
            if i == 0 {
                break;
            }
            i -= 1;
        }
    }
    (".".to_string(), path.to_string())
}

/// The directory part of [`split`].
pub fn dirname(path: &str) -> String {
    split(path).0
}

/// Join a directory and a basename, inserting exactly one separator only if
/// the directory does not already end with one. An empty dirname yields the
/// basename unchanged.
pub fn join(dirname: &str, basename: &str) -> String {
    if dirname.is_empty() {
        return basename.to_string();
    }
    let mut out = String::with_capacity(dirname.len() + basename.len() + 1);
    out.push_str(dirname);
    if !dirname.ends_with(is_sep) {
        out.push(SEP);
    }
    out.push_str(basename);
    out
}

/// Split a path at its last `.` into `(stem, extension)`; the extension
/// keeps the dot. Without a dot the stem is the whole input and the
/// extension is empty.
pub fn extname(path: &str) -> (String, String) {
    match path.rfind('.') {
        Some(i) => (path[..i].to_string(), path[i..].to_string()),
        None => (path.to_string(), String::new()),
    }
}

/// Whether `path` is absolute under the build platform's rules.
pub fn is_absolute(path: &str) -> bool {
    if cfg!(windows) {
        is_absolute_windows(path)
    } else {
        is_absolute_posix(path)
    }
}

/// POSIX flavor: absolute iff the path begins with `/`.
pub fn is_absolute_posix(path: &str) -> bool {
    path.as_bytes().first() == Some(&b'/')
}

/// Windows flavor: rooted (`/` or `\`) or drive-absolute (`X:` followed by
/// a separator).
pub fn is_absolute_windows(path: &str) -> bool {
    let bytes = path.as_bytes();
    match bytes.first() {
        Some(b'/') | Some(b'\\') => true,
        _ => bytes.len() >= 3 && bytes[1] == b':' && (bytes[2] == b'/' || bytes[2] == b'\\'),
    }
}

/// How a Windows path addresses a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignatorKind {
    None,
    Drive,
    NetworkShare,
}

/// A borrowed view of the disk designator on the front of a Windows path.
#[derive(Debug, Clone, Copy)]
pub struct WindowsPath<'a> {
    pub designator: &'a str,
    pub kind: DesignatorKind,
    pub is_absolute: bool,
}

/// Iterator over non-empty path components, splitting on any byte in
/// `seps`. `pos` tracks the byte offset just past the last component
/// produced, which is how the UNC designator's extent is measured.
struct Components<'a> {
    path: &'a str,
    seps: &'a [u8],
    pos: usize,
}

impl<'a> Components<'a> {
    fn new(path: &'a str, seps: &'a [u8]) -> Self {
        Self { path, seps, pos: 0 }
    }

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.path.as_bytes();
        while self.pos < bytes.len() && self.seps.contains(&bytes[self.pos]) {
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return None;
        }
        let start = self.pos;
        while self.pos < bytes.len() && !self.seps.contains(&bytes[self.pos]) {
            self.pos += 1;
        }
        Some(&self.path[start..self.pos])
    }
}

/// Parse the disk designator (drive letter or `\\server\share` prefix) off
/// the front of a Windows path.
pub fn parse_windows_path(path: &str) -> WindowsPath<'_> {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' {
        return WindowsPath {
            designator: &path[..2],
            kind: DesignatorKind::Drive,
            is_absolute: is_absolute_windows(path),
        };
    }
    if !bytes.is_empty()
        && (bytes[0] == b'/' || bytes[0] == b'\\')
        && (bytes.len() == 1 || (bytes[1] != b'/' && bytes[1] != b'\\'))
    {
        return WindowsPath {
            designator: "",
            kind: DesignatorKind::None,
            is_absolute: true,
        };
    }
    let relative = WindowsPath {
        designator: "",
        kind: DesignatorKind::None,
        is_absolute: false,
    };
    if bytes.len() < "//a/b".len() {
        return relative;
    }
    for sep in [b'/', b'\\'] {
        if bytes[0] == sep && bytes[1] == sep {
            if bytes[2] == sep {
                return relative;
            }
            let seps = [sep];
            let mut it = Components::new(path, &seps);
            if it.next().is_none() || it.next().is_none() {
                return relative;
            }
            return WindowsPath {
                designator: &path[..it.pos],
                kind: DesignatorKind::NetworkShare,
                is_absolute: is_absolute_windows(path),
            };
        }
    }
    relative
}

/// Compare two disk designators of the same kind for identity: drive
/// letters as single characters, UNC server and share names as whole
/// components, both case-insensitively.
fn designators_eq(kind: DesignatorKind, a: &str, b: &str) -> bool {
    match kind {
        DesignatorKind::None => {
            debug_assert!(a.is_empty() && b.is_empty());
            true
        }
        DesignatorKind::Drive => a.as_bytes()[0].eq_ignore_ascii_case(&b.as_bytes()[0]),
        DesignatorKind::NetworkShare => {
            let sep_a = [a.as_bytes()[0]];
            let sep_b = [b.as_bytes()[0]];
            let mut it_a = Components::new(a, &sep_a);
            let mut it_b = Components::new(b, &sep_b);
            match ((it_a.next(), it_a.next()), (it_b.next(), it_b.next())) {
                ((Some(server_a), Some(share_a)), (Some(server_b), Some(share_b))) => {
                    server_a.eq_ignore_ascii_case(server_b)
                        && share_a.eq_ignore_ascii_case(share_b)
                }
                _ => false,
            }
        }
    }
}

/// Append the components of `path` to `out`, normalizing `.` and `..` as it
/// goes. `floor` is the byte length of the prefix that `..` may never pop
/// past: zero for POSIX, the disk designator's extent on Windows.
fn walk_components(out: &mut String, path: &str, seps: &[u8], sep: char, floor: usize) {
    let mut it = Components::new(path, seps);
    while let Some(component) = it.next() {
        if component == "." {
            continue;
        } else if component == ".." {
            while out.len() > floor {
                match out.pop() {
                    Some(c) if c.is_ascii() && seps.contains(&(c as u8)) => break,
                    _ => {}
                }
            }
        } else {
            out.push(sep);
            out.push_str(component);
        }
    }
}

/// Resolve `paths` left to right against the process working directory,
/// using the build platform's rules. The result is non-empty, absolute, and
/// stable under re-resolution.
///
/// Total: an unobtainable working directory is an invariant violation and
/// panics rather than returning.
pub fn resolve(paths: &[&str]) -> String {
    let cwd = env::current_dir();
    if cfg!(windows) {
        resolve_windows(&cwd, paths)
    } else {
        resolve_posix(&cwd, paths)
    }
}

/// POSIX resolution against an explicit working directory.
///
/// The last absolute entry anchors the result and everything before it is
/// discarded; with no absolute entry the working directory is the implicit
/// first entry. `.` and `..` normalize away during a single left-to-right
/// component walk.
pub fn resolve_posix(cwd: &str, paths: &[&str]) -> String {
    if paths.is_empty() {
        return cwd.to_string();
    }
    let mut first_index = 0;
    let mut have_abs = false;
    for (i, p) in paths.iter().enumerate() {
        if is_absolute_posix(p) {
            first_index = i;
            have_abs = true;
        }
    }
    let mut out = if have_abs {
        String::new()
    } else {
        cwd.to_string()
    };
    for p in &paths[first_index..] {
        walk_components(&mut out, p, &[b'/'], '/', 0);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Windows resolution against an explicit working directory.
///
/// Same contract as [`resolve_posix`], complicated by disk designators. Two
/// passes: the first elects which designator kind the result will carry,
/// the second finds the last entry that is absolute on a matching
/// designator — the authoritative anchor. Entries on a foreign designator
/// are skipped during the walk, and `..` never pops past the designator.
pub fn resolve_windows(cwd: &str, paths: &[&str]) -> String {
    if paths.is_empty() {
        return cwd.to_string();
    }

    // Pass 1: elect the designator kind, remembering the last one seen.
    let mut result_designator = String::new();
    let mut have_kind = DesignatorKind::None;
    let mut have_abs = false;
    let mut first_index = 0;
    for (i, p) in paths.iter().enumerate() {
        let parsed = parse_windows_path(p);
        if parsed.is_absolute {
            have_abs = true;
            first_index = i;
        }
        match parsed.kind {
            DesignatorKind::Drive => {
                let letter = parsed.designator.as_bytes()[0].to_ascii_uppercase() as char;
                result_designator = format!("{letter}:");
                have_kind = DesignatorKind::Drive;
            }
            DesignatorKind::NetworkShare => {
                result_designator = parsed.designator.to_string();
                have_kind = DesignatorKind::NetworkShare;
            }
            DesignatorKind::None => {}
        }
    }

    // Pass 2: with the kind fixed, the anchor is the last entry that is
    // absolute on a matching designator.
    if have_kind != DesignatorKind::None {
        have_abs = false;
        first_index = 0;
        let mut correct = false;
        for (i, p) in paths.iter().enumerate() {
            let parsed = parse_windows_path(p);
            if parsed.kind != DesignatorKind::None {
                if parsed.kind == have_kind {
                    correct = designators_eq(have_kind, &result_designator, parsed.designator);
                } else {
                    continue;
                }
            }
            if !correct {
                continue;
            }
            if parsed.is_absolute {
                first_index = i;
                have_abs = true;
            }
        }
    }

    // Seed the output with the designator, inheriting it from the working
    // directory when no absolute entry carries one explicitly. `floor` is
    // the boundary `..` cannot pop past.
    let mut out;
    let floor;
    if have_abs {
        match have_kind {
            DesignatorKind::Drive => {
                out = result_designator.clone();
                floor = out.len();
            }
            DesignatorKind::NetworkShare => {
                let seps = [b'/', b'\\'];
                let mut it = Components::new(paths[first_index], &seps);
                let (server, share) = match (it.next(), it.next()) {
                    (Some(server), Some(share)) => (server, share),
                    // The anchor parsed as a network share, so both
                    // components exist.
                    _ => unreachable!("network share designator without server and share"),
                };
                out = format!("\\\\{server}\\{share}");
                floor = out.len();
                result_designator = out.clone();
            }
            DesignatorKind::None => {
                let parsed_cwd = parse_windows_path(cwd);
                out = parsed_cwd.designator.to_string();
                if parsed_cwd.kind == DesignatorKind::Drive
                    && let Some(first) = out.get_mut(..1)
                {
                    first.make_ascii_uppercase();
                }
                floor = out.len();
                result_designator = out.clone();
                have_kind = parsed_cwd.kind;
            }
        }
    } else {
        out = cwd.to_string();
        let parsed_cwd = parse_windows_path(cwd);
        result_designator = parsed_cwd.designator.to_string();
        if parsed_cwd.kind == DesignatorKind::Drive
            && let Some(first) = out.get_mut(..1)
        {
            first.make_ascii_uppercase();
        }
        floor = result_designator.len();
        have_kind = parsed_cwd.kind;
    }

    // Walk the entries from the anchor onward, skipping any on a foreign
    // designator.
    let seps = [b'/', b'\\'];
    let mut correct = true;
    for p in &paths[first_index..] {
        let parsed = parse_windows_path(p);
        if parsed.kind != DesignatorKind::None {
            if parsed.kind == have_kind {
                correct = designators_eq(have_kind, &result_designator, parsed.designator);
            } else {
                continue;
            }
        }
        if !correct {
            continue;
        }
        walk_components(&mut out, &p[parsed.designator.len()..], &seps, '\\', floor);
    }

    // A bare designator still names a directory; give it its separator.
    if out.len() == floor {
        out.push('\\');
    }
    out
}
