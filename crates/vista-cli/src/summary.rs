use console::Style;
use vista_core::config::GuardrailConfig;
use vista_core::ingest::ImageMetadata;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    accent: Style,
    disabled: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            accent: Style::new().green(),
            disabled: Style::new().dim().yellow(),
        }
    }
}

pub fn print_image_summary(meta: &ImageMetadata) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Image"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(5)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Source"),
        s.value.apply_to(meta.name.as_deref().unwrap_or("(unnamed)"))
    );
    println!("  {:<14}{}", s.label.apply_to("Kind"), s.accent.apply_to(meta.source_kind));
    println!("  {:<14}{}", s.label.apply_to("Type"), s.accent.apply_to(meta.mime));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{:.1} KB", meta.byte_length as f64 / 1024.0))
    );
    println!();

    println!("  {}", s.header.apply_to("Geometry"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Upright"),
        s.value.apply_to(format!("{}x{}", meta.width, meta.height))
    );
    if meta.orientation.is_upright() {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Orientation"),
            s.disabled.apply_to(meta.orientation)
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Orientation"),
            s.accent.apply_to(meta.orientation)
        );
    }
    if meta.is_downscaled {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Working"),
            s.value.apply_to(format!(
                "{}x{} ({:.1}%)",
                meta.working_width,
                meta.working_height,
                meta.downscale_factor * 100.0
            ))
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Working"),
            s.disabled.apply_to("full resolution")
        );
    }
    println!();

    print_limits_section(&s, &meta.limits);
}

fn print_limits_section(s: &Styles, limits: &GuardrailConfig) {
    println!("  {}", s.header.apply_to("Guardrails"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Display"),
        s.value.apply_to(format!("{} px", limits.display_max_dim))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Max side"),
        s.value.apply_to(format!("{} px", limits.hard_max_dim))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Max total"),
        s.value.apply_to(format!("{} px", limits.hard_max_pixels))
    );
    println!();
}
