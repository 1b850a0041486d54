use console::Style;
use framecrop_core::raster::{CropResult, SourceRect};
use framecrop_core::upload::UploadFolder;
use framecrop_core::viewport::{ImageSize, ViewportState};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    format: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            format: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

pub struct CropSummary<'a> {
    pub source: &'a str,
    pub source_size: Option<ImageSize>,
    pub state: ViewportState,
    pub min_scale: f64,
    pub max_scale: f64,
    pub rect: SourceRect,
    pub result: &'a CropResult,
    pub folder: UploadFolder,
    pub location: &'a str,
}

fn format_bytes(n: usize) -> String {
    if n >= 1024 * 1024 {
        format!("{:.1} MB", n as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} KB", n as f64 / 1024.0)
    }
}

pub fn print_crop_summary(summary: &CropSummary<'_>) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Framecrop"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(9)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Source"), s.path.apply_to(summary.source));
    if let Some(size) = summary.source_size {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Dimensions"),
            s.value.apply_to(format!("{}x{}", size.width, size.height))
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Viewport"));
    println!(
        "    {:<12}{} {}",
        s.label.apply_to("Scale"),
        s.value.apply_to(format!("{:.4}", summary.state.scale)),
        s.label.apply_to(format!(
            "(range {:.4} - {:.4})",
            summary.min_scale, summary.max_scale
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Offset"),
        s.value.apply_to(format!(
            "{:.1}, {:.1}",
            summary.state.offset_x, summary.state.offset_y
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Source rect"),
        s.value.apply_to(format!(
            "{:.1}, {:.1}  {:.1}x{:.1}",
            summary.rect.x, summary.rect.y, summary.rect.width, summary.rect.height
        ))
    );
    println!();

    print_result(&s, summary.result, summary.location, Some(summary.folder));
}

pub fn print_resize_summary(source: &str, result: &CropResult, location: &str) {
    let s = Styles::new();

    println!();
    println!("  {:<14}{}", s.label.apply_to("Source"), s.path.apply_to(source));
    print_result(&s, result, location, None);
}

fn print_result(s: &Styles, result: &CropResult, location: &str, folder: Option<UploadFolder>) {
    println!("  {}", s.header.apply_to("Output"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Format"),
        s.format.apply_to(result.content_type)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(format!("{}x{}", result.width, result.height))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format_bytes(result.data.len()))
    );
    if let Some(folder) = folder {
        println!("    {:<12}{}", s.label.apply_to("Folder"), s.value.apply_to(folder));
    }
    println!("    {:<12}{}", s.label.apply_to("Saved to"), s.path.apply_to(location));
    println!();
}
