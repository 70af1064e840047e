use regex::Captures;

/// Render a link label from `template` and a regex match.
///
/// `$0` is the whole match and `$N` the N-th capture group. Groups that did
/// not participate render as an empty string. Substitution is a single pass,
/// so inserted text is never rescanned. For a run of digits after `$` the
/// longest prefix naming an existing group is used: with ten or more groups
/// `$10` is group ten, otherwise it is `$1` followed by a literal `0`.
/// A `$` that names no group is kept as-is.
pub fn render_template(template: &str, captures: &Captures) -> String {
	let group_count = captures.len();
	let mut rendered = String::with_capacity(template.len());
	let mut rest = template;

	while let Some(dollar) = rest.find('$') {
		rendered.push_str(&rest[..dollar]);
		let after = &rest[dollar + 1..];
		let digits = after.len() - after.trim_start_matches(|c: char| c.is_ascii_digit()).len();

		match longest_group_prefix(&after[..digits], group_count) {
			Some((index, consumed)) => {
				if let Some(group) = captures.get(index) {
					rendered.push_str(group.as_str());
				}
				rest = &after[consumed..];
			}
			None => {
				rendered.push('$');
				rest = after;
			}
		}
	}

	rendered.push_str(rest);
	rendered
}

/// Longest prefix of `digits` that parses to an index below `group_count`.
fn longest_group_prefix(digits: &str, group_count: usize) -> Option<(usize, usize)> {
	(1..=digits.len()).rev().find_map(|len| {
		digits[..len]
			.parse::<usize>()
			.ok()
			.filter(|index| *index < group_count)
			.map(|index| (index, len))
	})
}
