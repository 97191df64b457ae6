//! Various utility macros

/// Assert that `selector` answers `expected` for every combination of the
/// provided ids, file names and variable names, and return how many
/// combinations were selected
#[macro_export]
macro_rules! selected_count (
    ($selector:expr, $ids:expr, $files:expr, $vars:expr, $expected:expr) => {{
        let selector = &$selector;
        let expected = $expected;
        let mut count = 0usize;

        for id in $ids.iter() {
            for file in $files.iter() {
                for var in $vars.iter() {
                    let is_match = selector.matches(*id, file, var);
                    assert_eq!(
                        is_match,
                        expected(*id, *file, *var),
                        "{:?} gave the wrong answer for ioid={}, fname={}, vname={}",
                        selector.pattern(),
                        id,
                        file,
                        var
                    );
                    if is_match {
                        count += 1;
                    }
                }
            }
        }

        count
    }}
);
