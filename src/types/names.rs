// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Display-name deduplication.

use std::collections::HashMap;

/// Makes display names unique while keeping their order.
///
/// The first occurrence of a name is kept as is. The n-th repeat of the same
/// name (n starting at 1) becomes `"<name>_<n>"`. The list position is the
/// identity used for every later call, so the output always has the same
/// length and order as the input.
///
/// Suffixed names are not checked against names that already carry the same
/// suffix: `["A", "A_1", "A"]` yields `["A", "A_1", "A_1"]`.
///
/// # Examples
///
/// ```
/// use nohassle_matrix::types::deduplicate_names;
///
/// let names = deduplicate_names(["A", "B", "A", "A"]);
/// assert_eq!(names, ["A", "B", "A_1", "A_2"]);
///
/// assert!(deduplicate_names(Vec::<String>::new()).is_empty());
/// ```
pub fn deduplicate_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();

    names
        .into_iter()
        .map(|name| {
            let name = name.into();
            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{name}_{count}")
            };
            *count += 1;
            unique
        })
        .collect()
}
