//! Static help texts: the group catalog and command-line usage examples.

use mljr_gc::GroupTable;

/// Lines are flushed once they grow past this many characters.
const WRAP_AT: usize = 54;
const LINE_PREFIX: &str = "--> ";

fn wrap_table(table: &GroupTable, out: &mut String) {
    let mut line = String::from(LINE_PREFIX);
    for record in table.records() {
        let names: Vec<&str> = record.names().collect();
        line.push_str(&format!("{{ {} }}    ", names.join("   ")));
        if line.chars().count() > WRAP_AT {
            out.push_str(line.trim());
            out.push('\n');
            line = String::from(LINE_PREFIX);
        }
    }
    if line.len() > LINE_PREFIX.len() {
        out.push_str(line.trim());
        out.push('\n');
    }
}

/// Every ring and non-ring group with its aliases, in table order.
pub fn group_catalog_text() -> String {
    let mut out = String::from(
        "Names in one brace are aliases of the same group; names are case-insensitive.\n\
         Symbol @ means three bonds.\n\n",
    );
    out.push_str("For Ring, Available Group Names are:\n");
    wrap_table(GroupTable::ring(), &mut out);
    out.push_str("\nFor No-Ring, Available Group Names are:\n");
    wrap_table(GroupTable::non_ring(), &mut out);
    out
}

pub fn usage_examples_text() -> String {
    "\
# List every available group name:
#    mljr groups

# Show the default template (Choline Chloride) on screen:
#    mljr template

# Show the mixture template (Choline Chloride Glycerol):
#    mljr template --ccg

# Write both templates to files in the current directory (never overwrites):
#    mljr template --ccl --ccg --write

# Run a calculation and print the report:
#    mljr calc input.txt

# Append the report to the input file instead:
#    mljr calc input.txt --append

# Density at 300 K, ignoring the file's t / t-ref / q-ref:
#    mljr calc input.txt -x 300

# Density and surface tension at 350 K from 56 mN/m at 298.15 K:
#    mljr calc input.txt -x 298.15 56 350

# Machine-readable report, or just the parsed input:
#    mljr calc input.txt --json
#    mljr validate input.txt
"
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_every_name_once_per_namespace() {
        let text = group_catalog_text();
        let (ring, non_ring) = text.split_once("For No-Ring").unwrap();
        for table in [GroupTable::ring(), GroupTable::non_ring()] {
            let section = if table.kind().is_ring() { ring } else { non_ring };
            for record in table.records() {
                let braced = format!("{{ {}", record.symbol);
                assert!(section.contains(&braced), "missing {}", record.symbol);
            }
        }
        assert!(non_ring.contains("Ammonium"));
    }

    #[test]
    fn catalog_lines_are_prefixed_and_wrapped() {
        let text = group_catalog_text();
        for line in text.lines().filter(|l| l.starts_with("-->")) {
            // A line is flushed right after the brace that pushed it past the limit.
            assert!(line.len() < WRAP_AT + 60, "{line}");
        }
        assert!(text.lines().filter(|l| l.starts_with("-->")).count() > 5);
    }
}
