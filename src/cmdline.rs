use std::path::Path;

/// Render `exe` followed by `args` as a single shell command line.
///
/// The executable is wrapped in double quotes when its path contains a space.
/// Arguments are appended verbatim, separated by single spaces.
pub fn commandline(exe: &Path, args: &[&str]) -> String {
    let exe = exe.to_string_lossy();
    let mut cmd = if exe.contains(' ') {
        format!("\"{}\"", exe)
    } else {
        exe.into_owned()
    };
    for arg in args {
        cmd.push(' ');
        cmd.push_str(arg);
    }
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Whitespace split that keeps double-quoted runs together.
    fn split_words(line: &str) -> Vec<String> {
        let mut words = Vec::new();
        let mut current = String::new();
        let mut quoted = false;
        let mut in_word = false;
        for c in line.chars() {
            match c {
                '"' => {
                    quoted = !quoted;
                    in_word = true;
                }
                c if c.is_whitespace() && !quoted => {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                c => {
                    current.push(c);
                    in_word = true;
                }
            }
        }
        if in_word {
            words.push(current);
        }
        words
    }

    #[test]
    fn quotes_path_with_space() {
        let exe = Path::new(r"C:\Program Files\CMake\bin\cmake.exe");
        assert_eq!(
            commandline(exe, &["--build", "."]),
            r#""C:\Program Files\CMake\bin\cmake.exe" --build ."#
        );
    }

    #[test]
    fn plain_path_is_not_quoted() {
        assert_eq!(
            commandline(Path::new(r"C:\Windows\system32\cmd.exe"), &["/K"]),
            r"C:\Windows\system32\cmd.exe /K"
        );
    }

    #[test]
    fn no_args_no_trailing_space() {
        assert_eq!(commandline(Path::new("cmake"), &[]), "cmake");
    }

    proptest! {
        #[test]
        fn prop_reparses_to_exe_and_args(
            exe in "[A-Za-z]:(\\\\[A-Za-z0-9 ._()]{0,12}){1,4}[A-Za-z0-9]",
            args in prop::collection::vec("[A-Za-z0-9_./=-]{1,10}", 0..5),
        ) {
            let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
            let line = commandline(Path::new(&exe), &arg_refs);

            if exe.contains(' ') {
                prop_assert!(line.starts_with('"'));
                let quoted = format!("\"{}\"", exe);
                prop_assert!(line.starts_with(&quoted));
            } else {
                prop_assert!(!line.contains('"'));
            }

            let words = split_words(&line);
            prop_assert_eq!(&words[0], &exe);
            prop_assert_eq!(&words[1..], &args[..]);
        }
    }
}
