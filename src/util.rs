/// GPA as shown to the user: three decimals with ties rounded up, or `NaN`
/// when nothing counted.
pub fn format_gpa(gpa: f64) -> String {
    if gpa.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.3}", (gpa * 1000.0).round() / 1000.0)
    }
}
