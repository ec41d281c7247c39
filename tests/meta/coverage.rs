//! Checks that `tests/unit/` mirrors `src/` file for file

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Files that organize modules rather than hold testable code
    fn is_organizational(relative: &str) -> bool {
        let name = relative.rsplit('/').next().unwrap_or(relative);
        matches!(name, "main.rs" | "lib.rs" | "mod.rs")
    }

    fn collect_relative_paths(dir: &Path, base: &Path) -> io::Result<BTreeSet<String>> {
        let mut paths = BTreeSet::new();
        if !dir.is_dir() {
            return Ok(paths);
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|e| io::Error::other(format!("failed to strip prefix: {e}")))?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                paths.extend(collect_relative_paths(&path, base)?);
                paths.insert(relative);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }
        Ok(paths)
    }

    fn src_and_unit_paths() -> (BTreeSet<String>, BTreeSet<String>) {
        let src = collect_relative_paths(Path::new("src"), Path::new("src"))
            .unwrap_or_else(|e| panic!("failed to read src: {e}"));
        let unit = collect_relative_paths(Path::new("tests/unit"), Path::new("tests/unit"))
            .unwrap_or_else(|e| panic!("failed to read tests/unit: {e}"));
        (src, unit)
    }

    // Tests every source file has a unit test file at the same relative path
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let (src, unit) = src_and_unit_paths();
        let missing: Vec<_> = src
            .iter()
            .filter(|path| !is_organizational(path) && !unit.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives the source it covered
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let (src, unit) = src_and_unit_paths();
        let orphaned: Vec<_> = unit
            .iter()
            .filter(|path| !is_organizational(path) && !src.contains(*path))
            .map(|path| format!("  - tests/unit/{path}"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "unit tests without a source file:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests every unit test file is declared by its parent module so it compiles
    #[test]
    fn test_unit_files_are_declared() {
        let (_, unit) = src_and_unit_paths();
        let mut undeclared = Vec::new();

        for path in unit.iter().filter(|p| !is_organizational(p)) {
            let (parent, module) = match path.rsplit_once('/') {
                Some((parent, name)) => (format!("tests/unit/{parent}/mod.rs"), name),
                None => ("tests/unit/main.rs".to_string(), path.as_str()),
            };
            let module = module.trim_end_matches(".rs");
            let declared = fs::read_to_string(&parent)
                .is_ok_and(|content| content.contains(&format!("mod {module};")));
            if !declared {
                undeclared.push(format!("  - tests/unit/{path} (not declared in {parent})"));
            }
        }

        assert!(
            undeclared.is_empty(),
            "unit test files never compiled:\n{}",
            undeclared.join("\n")
        );
    }

    // Tests every test source other than module organization contains a test
    #[test]
    fn test_all_test_files_contain_tests() {
        let tests = collect_relative_paths(Path::new("tests"), Path::new("tests"))
            .unwrap_or_else(|e| panic!("failed to read tests: {e}"));
        let empty: Vec<_> = tests
            .iter()
            .filter(|path| path.ends_with(".rs") && !is_organizational(path))
            .filter(|path| {
                fs::read_to_string(Path::new("tests").join(path))
                    .is_ok_and(|content| !content.contains("#[test]"))
            })
            .map(|path| format!("  - tests/{path}"))
            .collect();

        assert!(
            empty.is_empty(),
            "test files without #[test] functions:\n{}",
            empty.join("\n")
        );
    }
}
