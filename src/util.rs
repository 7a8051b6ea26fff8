use glam::Mat4;

/// Lay a matrix out as a labeled 4x4 block, row by row, for the debug
/// log. glam stores columns, so transpose first to print math-style rows.
pub fn format_mat4(label: &str, mat: &Mat4) -> String {
    let rows = mat.transpose().to_cols_array_2d();

    let mut output = format!("{label}:\n");
    for row in rows {
        output.push_str("  [");
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                output.push_str(", ");
            }
            output.push_str(&format!("{value:8.3}"));
        }
        output.push_str("]\n");
    }
    output
}
