//! Reaching-definitions analysis report.
//!
//! Plain text, deterministic: definitions in id order, blocks in id order,
//! sets sorted by definition id. Suitable for exact-match assertions.

use std::io::Write;

use crate::analyzer::SourceAnalysis;
use crate::flow::defs::DefId;
use rustc_hash::FxHashSet;

/// Writes the full analysis report: the definition table, per-block
/// gen/kill sets, the per-iteration IN/OUT snapshot trail, and the final
/// IN/OUT sets.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn write_report(writer: &mut impl Write, analysis: &SourceAnalysis) -> std::io::Result<()> {
    writeln!(writer, "=== Definitions (ID -> var, block, line) ===")?;
    for def in &analysis.definitions {
        writeln!(
            writer,
            "{}: {} in {} (line {}): {}",
            def.id, def.variable, def.block, def.line, def.text
        )?;
    }

    writeln!(writer, "\n=== gen[B] and kill[B] ===")?;
    for block in &analysis.blocks {
        let b = block.id.0;
        writeln!(
            writer,
            "{}: gen={} kill={}",
            block.id,
            fmt_ids(&sorted_ids(&analysis.gen_kill.gen[b])),
            fmt_ids(&sorted_ids(&analysis.gen_kill.kill[b]))
        )?;
    }

    writeln!(writer, "\n=== Dataflow iterations (snapshot per iteration) ===")?;
    for snapshot in &analysis.flow.history {
        writeln!(writer, "-- Iteration {} --", snapshot.iteration)?;
        for block in &analysis.blocks {
            let b = block.id.0;
            writeln!(
                writer,
                "{}: in={} out={}",
                block.id,
                fmt_ids(&snapshot.in_sets[b]),
                fmt_ids(&snapshot.out_sets[b])
            )?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "\n=== Final in[B] / out[B] ===")?;
    for block in &analysis.blocks {
        let b = block.id.0;
        writeln!(
            writer,
            "{}: in={} out={}",
            block.id,
            fmt_ids(&analysis.flow.in_sets[b]),
            fmt_ids(&analysis.flow.out_sets[b])
        )?;
    }

    Ok(())
}

fn sorted_ids(set: &FxHashSet<DefId>) -> Vec<DefId> {
    let mut ids: Vec<DefId> = set.iter().copied().collect();
    ids.sort_unstable();
    ids
}

fn fmt_ids(ids: &[DefId]) -> String {
    let parts: Vec<String> = ids.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze_source;

    #[test]
    fn test_report_sections_in_order() {
        let analysis = analyze_source("x = 1;\ny = 2;\n");
        let mut buf = Vec::new();
        write_report(&mut buf, &analysis).expect("report write");
        let text = String::from_utf8(buf).expect("utf8");

        let defs_pos = text.find("=== Definitions").expect("definitions section");
        let genkill_pos = text.find("=== gen[B] and kill[B] ===").expect("gen/kill section");
        let iter_pos = text.find("=== Dataflow iterations").expect("iterations section");
        let final_pos = text.find("=== Final in[B] / out[B] ===").expect("final section");
        assert!(defs_pos < genkill_pos);
        assert!(genkill_pos < iter_pos);
        assert!(iter_pos < final_pos);

        assert!(text.contains("D0: x in B0 (line 0): x = 1;"));
        assert!(text.contains("B0: gen=[D0, D1] kill=[]"));
        assert!(text.contains("-- Iteration 1 --"));
        assert!(text.contains("B0: in=[] out=[D0, D1]"));
    }
}
