//! Test suite for the analysis pipeline.

use cfgscan::analyzer::analyze_source;
use cfgscan::cfg::{BlockId, Edge, EdgeKind};
use cfgscan::flow::DefId;

fn has_edge(edges: &[Edge], from: usize, to: usize, kind: EdgeKind) -> bool {
    edges.contains(&Edge {
        from: BlockId(from),
        to: BlockId(to),
        kind,
    })
}

#[test]
fn test_straight_line_scenario() {
    let analysis = analyze_source("a = 1;\nb = 2;\nc = 3;\n");

    assert_eq!(analysis.blocks.len(), 1);
    assert!(analysis.edges.is_empty());
    assert_eq!(analysis.definitions.len(), 3);
    assert!(analysis.gen_kill.kill[0].is_empty());

    // IN stays empty; OUT holds all three definitions after one pass and is
    // stable thereafter.
    assert!(analysis.flow.in_sets[0].is_empty());
    assert_eq!(
        analysis.flow.out_sets[0],
        vec![DefId(0), DefId(1), DefId(2)]
    );
    assert_eq!(
        analysis.flow.history[0].out_sets[0],
        vec![DefId(0), DefId(1), DefId(2)]
    );
    assert_eq!(analysis.metrics.cyclomatic, 1);
}

#[test]
fn test_if_else_both_definitions_reach_the_join() {
    let source = "\
if (x)
{
    y = 1;
}
else
{
    y = 2;
}
z = y;
";
    let analysis = analyze_source(source);

    assert_eq!(analysis.blocks.len(), 4);
    assert!(has_edge(&analysis.edges, 0, 1, EdgeKind::True));
    assert!(has_edge(&analysis.edges, 0, 2, EdgeKind::False));
    assert!(has_edge(&analysis.edges, 1, 3, EdgeKind::Sequential));
    assert!(has_edge(&analysis.edges, 2, 3, EdgeKind::Sequential));

    // D0 is y=1 in the then block, D1 is y=2 in the else block. Neither
    // block dominates the other, so both reach the join.
    assert_eq!(analysis.definitions[0].variable, "y");
    assert_eq!(analysis.definitions[1].variable, "y");
    assert_eq!(analysis.flow.in_sets[3], vec![DefId(0), DefId(1)]);
}

#[test]
fn test_while_loop_carried_definition() {
    let source = "\
i = 0;
while (i < 10)
{
    i = i + 1;
}
done = 1;
";
    let analysis = analyze_source(source);

    // B0 init, B1 condition, B2 body, B3 after the loop.
    assert!(has_edge(&analysis.edges, 2, 1, EdgeKind::Back));
    assert!(has_edge(&analysis.edges, 1, 3, EdgeKind::Exit));

    // D0 is the init of i, D1 the body redefinition, D2 is done.
    assert_eq!(analysis.definitions[1].variable, "i");
    let body_def = DefId(1);

    // The body definition appears in its own OUT and, via the back edge, in
    // the condition block's IN.
    assert!(analysis.flow.out_sets[2].contains(&body_def));
    assert!(analysis.flow.in_sets[1].contains(&body_def));
    assert!(analysis.flow.iterations >= 2);

    // Cross-block kills for i, never the owning block's own id.
    assert!(analysis.gen_kill.kill[0].contains(&DefId(1)));
    assert!(!analysis.gen_kill.kill[0].contains(&DefId(0)));
    assert!(analysis.gen_kill.kill[2].contains(&DefId(0)));
    assert!(!analysis.gen_kill.kill[2].contains(&DefId(1)));
}

#[test]
fn test_return_creates_block_boundary() {
    let analysis = analyze_source("x = 1;\nreturn x;\ny = 2;\n");
    assert_eq!(analysis.blocks.len(), 2);
    assert_eq!(analysis.blocks[1].start, 2);
}

#[test]
fn test_cyclomatic_complexity_of_if_else_is_two() {
    // Branch size must not matter.
    let small = "\
if (x)
{
    y = 1;
}
else
{
    y = 2;
}
z = y;
";
    let large = "\
if (x)
{
    a = 1;
    b = 2;
    c = 3;
}
else
{
    a = 4;
    b = 5;
    c = 6;
}
z = a;
";
    assert_eq!(analyze_source(small).metrics.cyclomatic, 2);
    assert_eq!(analyze_source(large).metrics.cyclomatic, 2);
}

#[test]
fn test_metrics_match_edge_and_block_counts() {
    let source = "\
i = 0;
while (i < 10)
{
    i = i + 1;
}
done = 1;
";
    let analysis = analyze_source(source);
    let n = i64::try_from(analysis.blocks.len()).unwrap();
    let e = i64::try_from(analysis.edges.len()).unwrap();
    assert_eq!(analysis.metrics.cyclomatic, e - n + 2);
    assert_eq!(analysis.metrics.nodes, analysis.blocks.len());
    assert_eq!(analysis.metrics.edges, analysis.edges.len());
}

#[test]
fn test_comments_do_not_shift_line_indices() {
    let source = "\
/* header
   comment */
x = 1; // init
y = x;
";
    let analysis = analyze_source(source);
    assert_eq!(analysis.definitions.len(), 2);
    // Line indices refer to the original numbering, comments included.
    assert_eq!(analysis.definitions[0].line, 2);
    assert_eq!(analysis.definitions[0].text, "x = 1;");
    assert_eq!(analysis.definitions[1].line, 3);
}

#[test]
fn test_condition_lines_yield_no_definitions() {
    let analysis = analyze_source("if (x == 1)\n    y = 2;\nz = 3;\n");
    let vars: Vec<&str> = analysis
        .definitions
        .iter()
        .map(|d| d.variable.as_str())
        .collect();
    assert_eq!(vars, vec!["y", "z"]);
}

#[test]
fn test_for_loop_header_definition() {
    let source = "\
sum = 0;
for (i = 0; i < n; i++)
{
    sum += i;
}
total = sum;
";
    let analysis = analyze_source(source);
    // The for header itself defines i, owned by the condition block.
    let i_def = analysis
        .definitions
        .iter()
        .find(|d| d.variable == "i")
        .expect("definition of i");
    assert_eq!(i_def.block, BlockId(1));

    assert!(has_edge(&analysis.edges, 2, 1, EdgeKind::Back));
    assert!(has_edge(&analysis.edges, 1, 3, EdgeKind::Exit));
}

#[test]
fn test_solver_is_idempotent_at_fixed_point() {
    let source = "\
if (x)
{
    y = 1;
}
else
{
    y = 2;
}
z = y;
";
    let analysis = analyze_source(source);
    // The last snapshot is the stable pass: identical to the frozen sets.
    let last = analysis.flow.history.last().expect("non-empty history");
    assert_eq!(last.in_sets, analysis.flow.in_sets);
    assert_eq!(last.out_sets, analysis.flow.out_sets);
    assert!(analysis.flow.converged);
}

#[test]
fn test_trailing_block_after_return_is_still_analyzed() {
    let analysis = analyze_source("return 0;\nx = 1;\n");
    assert_eq!(analysis.blocks.len(), 2);
    // The trailing block still exists and still generates its definition.
    assert_eq!(analysis.definitions.len(), 1);
    assert_eq!(analysis.definitions[0].block, BlockId(1));
}
