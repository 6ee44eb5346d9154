use nix::unistd::Pid;

/// The word that expands to the shell's own process id.
pub const PID_PLACEHOLDER: &str = "$$";

/// Replaces the first `$$` in `word` with the decimal form of `pid`.
///
/// Later occurrences are left alone, so `$$$$` becomes `<pid>$$`.
pub fn expand_pid(word: &str, pid: Pid) -> String {
    match word.find(PID_PLACEHOLDER) {
        Some(pos) => {
            let pid = pid.as_raw().to_string();
            let mut expanded = String::with_capacity(word.len() + pid.len());
            expanded.push_str(&word[..pos]);
            expanded.push_str(&pid);
            expanded.push_str(&word[pos + PID_PLACEHOLDER.len()..]);
            expanded
        }
        None => word.to_string(),
    }
}

pub fn expand_in_place(word: &mut String, pid: Pid) {
    if let Some(pos) = word.find(PID_PLACEHOLDER) {
        word.replace_range(pos..pos + PID_PLACEHOLDER.len(), &pid.as_raw().to_string());
    }
}

/// Expands every word of a tokenized line.
pub fn expand_words(words: &mut [String], pid: Pid) {
    for word in words.iter_mut() {
        expand_in_place(word, pid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid() -> Pid {
        Pid::from_raw(4242)
    }

    #[test]
    fn replaces_single_placeholder() {
        assert_eq!(expand_pid("$$", pid()), "4242");
        assert_eq!(expand_pid("file.$$", pid()), "file.4242");
        assert_eq!(expand_pid("a$$b", pid()), "a4242b");
    }

    #[test]
    fn length_grows_by_pid_width_minus_two() {
        let pid = Pid::this();
        let width = pid.as_raw().to_string().len();
        for word in ["$$", "x$$", "dir/$$/file", "$$-suffix"] {
            let expanded = expand_pid(word, pid);
            assert_eq!(expanded.len(), word.len() + width - 2, "{word}");
        }
    }

    #[test]
    fn identity_without_placeholder() {
        for word in ["", "echo", "$", "a$b$", "$ $", "100$"] {
            assert_eq!(expand_pid(word, pid()), word);
        }
    }

    #[test]
    fn only_first_occurrence_is_replaced() {
        assert_eq!(expand_pid("$$$$", pid()), "4242$$");
        assert_eq!(expand_pid("a$$b$$c", pid()), "a4242b$$c");
        // "$$$" has exactly one leading placeholder
        assert_eq!(expand_pid("$$$", pid()), "4242$");
    }

    #[test]
    fn in_place_matches_pure_version() {
        for word in ["", "$$", "x$$y$$", "plain"] {
            let mut owned = word.to_string();
            expand_in_place(&mut owned, pid());
            assert_eq!(owned, expand_pid(word, pid()));
        }
    }

    #[test]
    fn expands_every_word() {
        let mut words = vec!["echo".to_string(), "$$".to_string(), "out$$".to_string()];
        expand_words(&mut words, pid());
        assert_eq!(words, vec!["echo", "4242", "out4242"]);
    }
}
