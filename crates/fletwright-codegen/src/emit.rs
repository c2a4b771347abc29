//! Per-type emission rules.
//!
//! Every element maps to exactly one Flet constructor expression. No rule
//! fails: a malformed or unknown field value falls back to its default and
//! the substitution is recorded as a [`Degradation`].

use crate::names::Names;
use crate::options::GeneratorOptions;
use crate::python::{coordinate, Call, Expr};
use fletwright_core::{CheckState, Degradation, Dimension, Element, ElementKind, StyleKey, StyleValue};

const BUTTON_BGCOLOR: &str = "#0175C2";
const BUTTON_COLOR: &str = "#FFFFFF";
const DEFAULT_WIDTH: i64 = 200;
const DEFAULT_IMAGE_SIZE: i64 = 150;

pub(crate) struct Emitter<'a> {
    names: &'a Names,
    options: &'a GeneratorOptions,
    degradations: Vec<Degradation>,
}

impl<'a> Emitter<'a> {
    pub fn new(names: &'a Names, options: &'a GeneratorOptions) -> Self {
        Self {
            names,
            options,
            degradations: Vec::new(),
        }
    }

    pub fn into_degradations(self) -> Vec<Degradation> {
        self.degradations
    }

    /// Emit the constructor expression for one element and its children.
    pub fn emit(&mut self, element: &Element) -> Call {
        let call = match &element.kind {
            ElementKind::Text => self.text(element),
            ElementKind::Button => self.button(element),
            ElementKind::Checkbox { checked } => self.checkbox(element, *checked),
            ElementKind::Image => self.image(element),
            ElementKind::Input {
                placeholder,
                label,
                password,
            } => self.input(element, placeholder.as_deref(), label.as_deref(), *password),
            ElementKind::Dropdown {
                placeholder,
                options,
            } => self.dropdown(element, placeholder.as_deref(), options),
            ElementKind::Slider { label, value } => self.slider(element, label.as_deref(), *value),
            ElementKind::ProgressBar { value } => self.progress_bar(element, *value),
            ElementKind::Divider => self.divider(element),
            ElementKind::Container { children } => self.container(element, children),
            ElementKind::FilePicker {
                allow_multiple,
                allowed_extensions,
            } => self.file_picker(element, *allow_multiple, allowed_extensions),
            ElementKind::Other(tag) => {
                self.degradations.push(Degradation::UnknownElementType {
                    element: element.id.clone(),
                    type_name: tag.clone(),
                });
                return Call::new("ft.Container");
            }
        };

        call.kwarg("top", Expr::int(coordinate(element.y)))
            .kwarg("left", Expr::int(coordinate(element.x)))
    }

    fn text(&mut self, el: &Element) -> Call {
        let size = self.style_number(el, &StyleKey::FontSize).unwrap_or(14.0);
        let color = el.styles.str(&StyleKey::Color).unwrap_or("#000000");
        let italic = el.styles.str(&StyleKey::FontStyle) == Some("italic");

        Call::new("ft.Text")
            .arg(Expr::str(&el.content))
            .kwarg("size", Expr::num(size))
            .kwarg("color", Expr::str(color))
            .kwarg("weight", Expr::raw(self.font_weight(el)))
            .kwarg("italic", Expr::bool(italic))
            .kwarg("text_align", Expr::raw(self.text_align(el)))
            .kwarg_opt("bgcolor", color_style(el, &StyleKey::BackgroundColor))
    }

    fn button(&mut self, el: &Element) -> Call {
        let variant = el.styles.str(&StyleKey::Variant).unwrap_or("default");
        let constructor = match variant {
            "outline" | "outlined" => "ft.OutlinedButton",
            "text" | "link" => "ft.TextButton",
            "default" | "elevated" | "filled" | "primary" | "secondary" | "destructive" | "ghost" => {
                "ft.ElevatedButton"
            }
            other => {
                self.degradations
                    .push(Degradation::unknown_option(&el.id, "variant", other));
                "ft.ElevatedButton"
            }
        };
        let bgcolor = if variant == "ghost" {
            "transparent"
        } else {
            el.styles
                .str(&StyleKey::BackgroundColor)
                .unwrap_or(BUTTON_BGCOLOR)
        };
        let color = el.styles.str(&StyleKey::Color).unwrap_or(BUTTON_COLOR);
        let height = match el.styles.str(&StyleKey::Size).unwrap_or("default") {
            "sm" => 32,
            "lg" => 48,
            "default" | "icon" => 40,
            other => {
                self.degradations
                    .push(Degradation::unknown_option(&el.id, "size", other));
                40
            }
        };
        let width = self.dimension(el, "width", &el.width).unwrap_or(DEFAULT_WIDTH);
        let on_click = self
            .names
            .handler(&el.id)
            .map(|handler| Expr::lambda(Call::new(handler)));

        Call::new(constructor)
            .kwarg("text", Expr::str(&el.content))
            .kwarg(
                "style",
                Call::new("ft.ButtonStyle")
                    .kwarg("color", Expr::str(color))
                    .kwarg("bgcolor", Expr::str(bgcolor)),
            )
            .kwarg("width", Expr::int(width))
            .kwarg("height", Expr::int(height))
            .kwarg_opt("on_click", on_click)
    }

    fn checkbox(&mut self, el: &Element, checked: CheckState) -> Call {
        let px: i64 = match el.styles.str(&StyleKey::Size).unwrap_or("default") {
            "sm" => 16,
            "lg" => 24,
            "default" => 20,
            other => {
                self.degradations
                    .push(Degradation::unknown_option(&el.id, "size", other));
                20
            }
        };
        let label_position = match el.styles.str(&StyleKey::LabelPosition).unwrap_or("right") {
            "right" => "ft.LabelPosition.RIGHT",
            "left" => "ft.LabelPosition.LEFT",
            other => {
                self.degradations
                    .push(Degradation::unknown_option(&el.id, "labelPosition", other));
                "ft.LabelPosition.RIGHT"
            }
        };
        let value = match checked {
            CheckState::Checked => Expr::bool(true),
            CheckState::Unchecked => Expr::bool(false),
            CheckState::Indeterminate => Expr::raw("None"),
        };
        let fill_color = el.styles.str(&StyleKey::Color).unwrap_or("primary");
        let label_color = el.styles.str(&StyleKey::LabelColor).unwrap_or("black");

        Call::new("ft.Checkbox")
            .kwarg("label", Expr::str(&el.content))
            .kwarg("value", value)
            .kwarg("tristate", Expr::bool(checked == CheckState::Indeterminate))
            .kwarg("label_position", Expr::raw(label_position))
            .kwarg("scale", Expr::num(px as f64 / 20.0))
            .kwarg("fill_color", Expr::str(fill_color))
            .kwarg(
                "label_style",
                Call::new("ft.TextStyle")
                    .kwarg("size", Expr::num((px * 4) as f64 / 5.0))
                    .kwarg("color", Expr::str(label_color)),
            )
    }

    fn image(&mut self, el: &Element) -> Call {
        let source = match base64_payload(&el.content) {
            Some(payload) => ("src_base64", Expr::str(payload)),
            None if el.content.trim().is_empty() => ("src", Expr::str(&self.options.placeholder_image)),
            None => ("src", Expr::str(&el.content)),
        };
        let fit = match el.styles.str(&StyleKey::ObjectFit).unwrap_or("contain") {
            "contain" => "ft.ImageFit.CONTAIN",
            "cover" => "ft.ImageFit.COVER",
            "fill" => "ft.ImageFit.FILL",
            "none" => "ft.ImageFit.NONE",
            "scale-down" => "ft.ImageFit.SCALE_DOWN",
            other => {
                self.degradations
                    .push(Degradation::unknown_option(&el.id, "objectFit", other));
                "ft.ImageFit.CONTAIN"
            }
        };

        Call::new("ft.Image")
            .kwarg(source.0, source.1)
            .kwarg(
                "width",
                Expr::int(self.dimension(el, "width", &el.width).unwrap_or(DEFAULT_IMAGE_SIZE)),
            )
            .kwarg(
                "height",
                Expr::int(self.dimension(el, "height", &el.height).unwrap_or(DEFAULT_IMAGE_SIZE)),
            )
            .kwarg("fit", Expr::raw(fit))
            .kwarg_opt("border_radius", self.number_style(el, &StyleKey::BorderRadius))
    }

    fn input(
        &mut self,
        el: &Element,
        placeholder: Option<&str>,
        label: Option<&str>,
        password: bool,
    ) -> Call {
        let width = self.dimension(el, "width", &el.width).unwrap_or(DEFAULT_WIDTH);
        let mut call = Call::new("ft.TextField")
            .kwarg("value", Expr::str(&el.content))
            .kwarg_opt("label", non_empty(label).map(Expr::str))
            .kwarg_opt("hint_text", non_empty(placeholder).map(Expr::str));
        if password {
            call = call
                .kwarg("password", Expr::bool(true))
                .kwarg("can_reveal_password", Expr::bool(true));
        }
        call.kwarg("width", Expr::int(width))
            .kwarg_opt("color", color_style(el, &StyleKey::Color))
            .kwarg_opt("bgcolor", color_style(el, &StyleKey::BackgroundColor))
            .kwarg_opt("border_color", color_style(el, &StyleKey::BorderColor))
            .kwarg_opt("border_width", self.number_style(el, &StyleKey::BorderWidth))
            .kwarg_opt("border_radius", self.number_style(el, &StyleKey::BorderRadius))
    }

    fn dropdown(&mut self, el: &Element, placeholder: Option<&str>, options: &[String]) -> Call {
        let hint = non_empty(placeholder).unwrap_or("Select an option");
        let choices = options
            .iter()
            .map(|option| Call::new("ft.dropdown.Option").arg(Expr::str(option)).into())
            .collect();
        let value = if el.content.is_empty() {
            None
        } else if options.iter().any(|o| o == &el.content) {
            Some(Expr::str(&el.content))
        } else {
            self.degradations
                .push(Degradation::unknown_option(&el.id, "dropdown value", el.content.as_str()));
            None
        };
        let width = self.dimension(el, "width", &el.width).unwrap_or(DEFAULT_WIDTH);

        Call::new("ft.Dropdown")
            .kwarg("hint_text", Expr::str(hint))
            .kwarg("options", Expr::List(choices))
            .kwarg_opt("value", value)
            .kwarg("width", Expr::int(width))
    }

    fn slider(&mut self, el: &Element, label: Option<&str>, value: Option<f64>) -> Call {
        let mut min = self.style_number(el, &StyleKey::Min).unwrap_or(0.0);
        let mut max = self.style_number(el, &StyleKey::Max).unwrap_or(100.0);
        if max <= min {
            self.degradations.push(Degradation::malformed(
                &el.id,
                "max",
                format!("{} (not above min {})", max, min),
            ));
            min = 0.0;
            max = 100.0;
        }
        let value = value
            .filter(|v| v.is_finite())
            .unwrap_or(50.0)
            .clamp(min, max);
        let divisions = self
            .style_number(el, &StyleKey::Step)
            .filter(|step| *step > 0.0)
            .map(|step| ((max - min) / step).round())
            .filter(|divisions| *divisions >= 1.0)
            .map(|divisions| divisions as i64);
        let width = self.dimension(el, "width", &el.width).unwrap_or(DEFAULT_WIDTH);

        Call::new("ft.Slider")
            .kwarg("min", Expr::num(min))
            .kwarg("max", Expr::num(max))
            .kwarg("value", Expr::num(value))
            .kwarg_opt("divisions", divisions.map(Expr::int))
            .kwarg_opt("label", non_empty(label).map(Expr::str))
            .kwarg_opt("active_color", color_style(el, &StyleKey::Color))
            .kwarg("width", Expr::int(width))
    }

    fn progress_bar(&mut self, el: &Element, value: Option<f64>) -> Call {
        let value = value.filter(|v| v.is_finite()).unwrap_or(0.0).clamp(0.0, 1.0);
        let width = self.dimension(el, "width", &el.width).unwrap_or(DEFAULT_WIDTH);

        Call::new("ft.ProgressBar")
            .kwarg("value", Expr::num(value))
            .kwarg("width", Expr::int(width))
            .kwarg_opt("bar_height", self.dimension(el, "height", &el.height).map(Expr::int))
            .kwarg_opt("color", color_style(el, &StyleKey::Color))
            .kwarg_opt("bgcolor", color_style(el, &StyleKey::BackgroundColor))
    }

    fn divider(&mut self, el: &Element) -> Call {
        let vertical = match el.styles.str(&StyleKey::Orientation).unwrap_or("horizontal") {
            "horizontal" => false,
            "vertical" => true,
            other => {
                self.degradations
                    .push(Degradation::unknown_option(&el.id, "orientation", other));
                false
            }
        };
        let thickness = self
            .style_number(el, &StyleKey::Thickness)
            .filter(|t| *t >= 0.0)
            .unwrap_or(1.0);
        let color = color_style(el, &StyleKey::Color);
        let width = self.dimension(el, "width", &el.width);
        let height = self.dimension(el, "height", &el.height);

        let line = if vertical {
            Call::new("ft.VerticalDivider")
                .kwarg_opt("width", width.map(Expr::int))
                .kwarg("thickness", Expr::num(thickness))
                .kwarg_opt("color", color)
        } else {
            Call::new("ft.Divider")
                .kwarg_opt("height", height.map(Expr::int))
                .kwarg("thickness", Expr::num(thickness))
                .kwarg_opt("color", color)
        };

        Call::new("ft.Container")
            .kwarg("content", line)
            .kwarg_opt("width", width.map(Expr::int))
            .kwarg_opt("height", height.map(Expr::int))
    }

    fn container(&mut self, el: &Element, children: &[Element]) -> Call {
        let controls = children.iter().map(|child| self.emit(child).into()).collect();

        Call::new("ft.Container")
            .kwarg("content", Call::new("ft.Stack").arg(Expr::List(controls)))
            .kwarg_opt("width", self.dimension(el, "width", &el.width).map(Expr::int))
            .kwarg_opt("height", self.dimension(el, "height", &el.height).map(Expr::int))
            .kwarg_opt("bgcolor", color_style(el, &StyleKey::BackgroundColor))
            .kwarg_opt("border_radius", self.number_style(el, &StyleKey::BorderRadius))
    }

    fn file_picker(&mut self, el: &Element, allow_multiple: bool, allowed_extensions: &str) -> Call {
        let label = if el.content.trim().is_empty() {
            "Choose File"
        } else {
            el.content.as_str()
        };
        let width = self.dimension(el, "width", &el.width).unwrap_or(DEFAULT_WIDTH);
        let height = self.dimension(el, "height", &el.height).unwrap_or(40);
        let bgcolor = el
            .styles
            .str(&StyleKey::BackgroundColor)
            .unwrap_or(BUTTON_BGCOLOR);
        let color = el.styles.str(&StyleKey::Color).unwrap_or(BUTTON_COLOR);
        let picker = self.names.picker(&el.id);

        let on_click = picker.map(|picker| {
            let extensions = parse_extensions(allowed_extensions)
                .map(|list| Expr::List(list.iter().map(|ext| Expr::str(ext)).collect()));
            Expr::lambda(
                Call::new(format!("{}.pick_files", picker.dialog))
                    .kwarg("allow_multiple", Expr::bool(allow_multiple))
                    .kwarg_opt("allowed_extensions", extensions),
            )
        });
        let button = Call::new("ft.ElevatedButton")
            .kwarg("text", Expr::str(label))
            .kwarg("icon", Expr::raw("ft.icons.UPLOAD_FILE"))
            .kwarg_opt("on_click", on_click)
            .kwarg("width", Expr::int(width))
            .kwarg("height", Expr::int(height))
            .kwarg(
                "style",
                Call::new("ft.ButtonStyle")
                    .kwarg("bgcolor", Expr::str(bgcolor))
                    .kwarg("color", Expr::str(color)),
            );

        let mut controls = vec![Expr::from(button)];
        if let Some(picker) = picker {
            controls.push(Expr::raw(picker.status.as_str()));
        }
        Call::new("ft.Row").kwarg("controls", Expr::List(controls))
    }

    fn font_weight(&mut self, el: &Element) -> &'static str {
        const NUMERIC: [&str; 9] = [
            "ft.FontWeight.W_100",
            "ft.FontWeight.W_200",
            "ft.FontWeight.W_300",
            "ft.FontWeight.W_400",
            "ft.FontWeight.W_500",
            "ft.FontWeight.W_600",
            "ft.FontWeight.W_700",
            "ft.FontWeight.W_800",
            "ft.FontWeight.W_900",
        ];

        let Some(value) = el.styles.get(&StyleKey::FontWeight) else {
            return "ft.FontWeight.NORMAL";
        };
        match value.as_str() {
            Some("normal") => return "ft.FontWeight.NORMAL",
            Some("bold") => return "ft.FontWeight.BOLD",
            Some("lighter") => return "ft.FontWeight.W_300",
            Some("bolder") => return "ft.FontWeight.W_800",
            _ => {}
        }
        if let Some(n) = value.as_number() {
            if n.fract() == 0.0 && (100.0..=900.0).contains(&n) && n % 100.0 == 0.0 {
                return NUMERIC[(n / 100.0) as usize - 1];
            }
        }
        self.degradations
            .push(Degradation::unknown_option(&el.id, "fontWeight", describe(value)));
        "ft.FontWeight.NORMAL"
    }

    fn text_align(&mut self, el: &Element) -> &'static str {
        match el.styles.str(&StyleKey::TextAlign).unwrap_or("left") {
            "left" => "ft.TextAlign.LEFT",
            "center" => "ft.TextAlign.CENTER",
            "right" => "ft.TextAlign.RIGHT",
            "justify" => "ft.TextAlign.JUSTIFY",
            "start" => "ft.TextAlign.START",
            "end" => "ft.TextAlign.END",
            other => {
                self.degradations
                    .push(Degradation::unknown_option(&el.id, "textAlign", other));
                "ft.TextAlign.LEFT"
            }
        }
    }

    /// Numeric style value; a present but non-numeric value is recorded and
    /// treated as unset.
    fn style_number(&mut self, el: &Element, key: &StyleKey) -> Option<f64> {
        let value = el.styles.get(key)?;
        match value.as_number() {
            Some(n) => Some(n),
            None => {
                self.degradations
                    .push(Degradation::malformed(&el.id, key.name(), describe(value)));
                None
            }
        }
    }

    fn number_style(&mut self, el: &Element, key: &StyleKey) -> Option<Expr> {
        self.style_number(el, key).map(Expr::num)
    }

    /// Positive pixel size. Zero and negative sizes mean unset; relative
    /// sizes such as `"100%"` are recorded and treated as unset.
    fn dimension(&mut self, el: &Element, field: &str, dimension: &Dimension) -> Option<i64> {
        match dimension.to_px() {
            Some(px) if px > 0 => Some(px),
            Some(_) => None,
            None => {
                self.degradations
                    .push(Degradation::malformed(&el.id, field, dimension));
                None
            }
        }
    }
}

fn color_style(el: &Element, key: &StyleKey) -> Option<Expr> {
    el.styles.str(key).map(Expr::str)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

fn describe(value: &StyleValue) -> String {
    match value {
        StyleValue::String(s) => format!("{:?}", s),
        StyleValue::Number(n) => n.to_string(),
        StyleValue::Bool(b) => b.to_string(),
    }
}

/// Base64 payload of a `data:` URI, i.e. everything after the first comma.
pub fn base64_payload(content: &str) -> Option<&str> {
    let content = content.trim();
    if !content.starts_with("data:") || !content.contains(";base64,") {
        return None;
    }
    content.split_once(',').map(|(_, payload)| payload)
}

/// Parse a comma-separated extension allow-list.
///
/// Entries are trimmed and lose a leading `*.` or `.`. Returns `None` when
/// any file is allowed: the list is empty or contains `*`.
pub fn parse_extensions(list: &str) -> Option<Vec<String>> {
    let mut extensions = Vec::new();
    for entry in list.split(',') {
        let entry = entry.trim();
        if entry == "*" || entry == "*.*" {
            return None;
        }
        let entry = entry
            .strip_prefix("*.")
            .or_else(|| entry.strip_prefix('.'))
            .unwrap_or(entry)
            .trim();
        if !entry.is_empty() {
            extensions.push(entry.to_string());
        }
    }
    (!extensions.is_empty()).then_some(extensions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fletwright_core::ElementType;

    fn emit_one(element: &Element) -> (String, Vec<Degradation>) {
        let elements = std::slice::from_ref(element);
        let names = Names::allocate(elements, "handle_click");
        let options = GeneratorOptions::default();
        let mut emitter = Emitter::new(&names, &options);
        let code = emitter.emit(element).render(0);
        (code, emitter.into_degradations())
    }

    #[test]
    fn test_parse_extensions() {
        assert_eq!(
            parse_extensions("txt, pdf"),
            Some(vec!["txt".to_string(), "pdf".to_string()])
        );
        assert_eq!(
            parse_extensions("*.png, .jpg,,"),
            Some(vec!["png".to_string(), "jpg".to_string()])
        );
        assert_eq!(parse_extensions("*"), None);
        assert_eq!(parse_extensions("txt, *"), None);
        assert_eq!(parse_extensions(""), None);
        assert_eq!(parse_extensions(" , "), None);
    }

    #[test]
    fn test_base64_payload() {
        assert_eq!(base64_payload("data:image/png;base64,AAAA"), Some("AAAA"));
        assert_eq!(base64_payload("https://x.test/a.png"), None);
        assert_eq!(base64_payload("data:text/plain,hello"), None);
    }

    #[test]
    fn test_text_defaults() {
        let text = Element::new("t", ElementKind::Text)
            .with_content("Hi")
            .with_position(10.0, 20.0);
        let (code, degradations) = emit_one(&text);

        assert!(code.starts_with("ft.Text(\n    \"Hi\","));
        assert!(code.contains("size=14"));
        assert!(code.contains("color=\"#000000\""));
        assert!(code.contains("weight=ft.FontWeight.NORMAL"));
        assert!(code.contains("italic=False"));
        assert!(code.contains("text_align=ft.TextAlign.LEFT"));
        assert!(!code.contains("bgcolor"));
        assert!(code.contains("top=20"));
        assert!(code.contains("left=10"));
        assert!(degradations.is_empty());
    }

    #[test]
    fn test_font_weight_mapping() {
        let bold = Element::new("t", ElementKind::Text).with_style("fontWeight", "bold");
        assert!(emit_one(&bold).0.contains("weight=ft.FontWeight.BOLD"));

        let numeric = Element::new("t", ElementKind::Text).with_style("fontWeight", 600.0);
        assert!(emit_one(&numeric).0.contains("weight=ft.FontWeight.W_600"));

        let string_numeric = Element::new("t", ElementKind::Text).with_style("fontWeight", "300");
        assert!(emit_one(&string_numeric).0.contains("weight=ft.FontWeight.W_300"));

        let bogus = Element::new("t", ElementKind::Text).with_style("fontWeight", "heavy");
        let (code, degradations) = emit_one(&bogus);
        assert!(code.contains("weight=ft.FontWeight.NORMAL"));
        assert_eq!(degradations.len(), 1);
    }

    #[test]
    fn test_button_variants_and_sizes() {
        let outline = Element::with_defaults("b", ElementType::Button).with_style("variant", "outline");
        assert!(emit_one(&outline).0.starts_with("ft.OutlinedButton("));

        let link = Element::with_defaults("b", ElementType::Button).with_style("variant", "link");
        assert!(emit_one(&link).0.starts_with("ft.TextButton("));

        let ghost = Element::with_defaults("b", ElementType::Button).with_style("variant", "ghost");
        let (code, _) = emit_one(&ghost);
        assert!(code.starts_with("ft.ElevatedButton("));
        assert!(code.contains("bgcolor=\"transparent\""));

        let large = Element::with_defaults("b", ElementType::Button).with_style("size", "lg");
        assert!(emit_one(&large).0.contains("height=48"));
    }

    #[test]
    fn test_editor_outlined_variant() {
        let outlined = Element::with_defaults("b", ElementType::Button).with_style("variant", "outlined");
        let (code, degradations) = emit_one(&outlined);
        assert!(code.starts_with("ft.OutlinedButton("));
        assert!(degradations.is_empty());

        let filled = Element::with_defaults("b", ElementType::Button).with_style("variant", "filled");
        assert!(emit_one(&filled).0.starts_with("ft.ElevatedButton("));
    }

    #[test]
    fn test_button_defaults() {
        let button = Element::new("b", ElementKind::Button).with_content("Go");
        let (code, degradations) = emit_one(&button);

        assert!(code.contains("text=\"Go\""));
        assert!(code.contains("style=ft.ButtonStyle(color=\"#FFFFFF\", bgcolor=\"#0175C2\")"));
        assert!(code.contains("width=200"));
        assert!(code.contains("height=40"));
        assert!(code.contains("on_click=lambda _: handle_click_0()"));
        assert!(degradations.is_empty());
    }

    #[test]
    fn test_malformed_width_degrades() {
        let button = Element::new("b", ElementKind::Button)
            .with_size(Dimension::Relative("100%".into()), Dimension::Px(40.0));
        let (code, degradations) = emit_one(&button);

        assert!(code.contains("width=200"));
        assert!(matches!(
            &degradations[..],
            [Degradation::MalformedField { field, .. }] if field == "width"
        ));
    }

    #[test]
    fn test_checkbox_sizes_and_states() {
        let checkbox = Element::with_defaults("c", ElementType::Checkbox).with_style("size", "lg");
        let (code, _) = emit_one(&checkbox);
        assert!(code.contains("scale=1.2"));
        assert!(code.contains("label_style=ft.TextStyle(size=19.2, color=\"black\")"));
        assert!(code.contains("value=False"));
        assert!(code.contains("tristate=False"));

        let mut mixed = Element::with_defaults("c", ElementType::Checkbox);
        mixed.kind = ElementKind::Checkbox {
            checked: CheckState::Indeterminate,
        };
        let (code, _) = emit_one(&mixed);
        assert!(code.contains("value=None"));
        assert!(code.contains("tristate=True"));
    }

    #[test]
    fn test_image_sources() {
        let inline = Element::new("i", ElementKind::Image).with_content("data:image/png;base64,QUJD");
        let (code, _) = emit_one(&inline);
        assert!(code.contains("src_base64=\"QUJD\""));
        assert!(!code.contains("data:"));

        let url = Element::new("i", ElementKind::Image).with_content("https://x.test/cat.png");
        let (code, _) = emit_one(&url);
        assert!(code.contains("src=\"https://x.test/cat.png\""));
        assert!(code.contains("width=150"));
        assert!(code.contains("fit=ft.ImageFit.CONTAIN"));

        let empty = Element::new("i", ElementKind::Image);
        assert!(emit_one(&empty).0.contains("src=\"https://picsum.photos/200\""));
    }

    #[test]
    fn test_file_picker_row() {
        let mut picker = Element::with_defaults("f", ElementType::FilePicker);
        picker.kind = ElementKind::FilePicker {
            allow_multiple: true,
            allowed_extensions: "txt, pdf".to_string(),
        };
        let (code, _) = emit_one(&picker);

        assert!(code.starts_with("ft.Row("));
        assert!(code.contains("icon=ft.icons.UPLOAD_FILE"));
        assert!(code.contains("lambda _: pick_files_dialog_0.pick_files("));
        assert!(code.contains("allow_multiple=True"));
        assert!(code.contains("allowed_extensions=[\"txt\", \"pdf\"]"));
        assert!(code.contains("selected_files_0"));
    }

    #[test]
    fn test_file_picker_any_extension_omits_argument() {
        let picker = Element::with_defaults("f", ElementType::FilePicker);
        let (code, _) = emit_one(&picker);
        assert!(!code.contains("allowed_extensions"));
        assert!(code.contains("pick_files(allow_multiple=False)"));
    }

    #[test]
    fn test_container_children_in_order() {
        let container = Element::new("c", ElementKind::default_for(ElementType::Container))
            .with_size(300.0, 200.0)
            .with_child(Element::new("a", ElementKind::Text).with_content("first"))
            .with_child(Element::new("b", ElementKind::Text).with_content("second"));
        let (code, _) = emit_one(&container);

        assert!(code.starts_with("ft.Container(\n    content=ft.Stack("));
        let first = code.find("\"first\"").unwrap();
        let second = code.find("\"second\"").unwrap();
        assert!(first < second);
        assert!(code.contains("width=300"));
    }

    #[test]
    fn test_slider_clamps_and_divides() {
        let slider = Element::new(
            "s",
            ElementKind::Slider {
                label: None,
                value: Some(250.0),
            },
        )
        .with_style("max", 200.0)
        .with_style("step", 10.0);
        let (code, _) = emit_one(&slider);

        assert!(code.contains("min=0"));
        assert!(code.contains("max=200"));
        assert!(code.contains("value=200"));
        assert!(code.contains("divisions=20"));
    }

    #[test]
    fn test_progress_bar_clamps() {
        let bar = Element::new("p", ElementKind::ProgressBar { value: Some(1.5) });
        assert!(emit_one(&bar).0.contains("value=1"));
    }

    #[test]
    fn test_vertical_divider() {
        let divider = Element::new("d", ElementKind::Divider)
            .with_size(0.0, 120.0)
            .with_style("orientation", "vertical")
            .with_style("thickness", 2.0);
        let (code, _) = emit_one(&divider);
        assert!(code.contains("ft.VerticalDivider(thickness=2)"));
        assert!(code.contains("height=120"));
    }

    #[test]
    fn test_dropdown_options() {
        let dropdown = Element::new(
            "d",
            ElementKind::Dropdown {
                placeholder: None,
                options: vec!["Red".into(), "Blue".into()],
            },
        )
        .with_content("Blue");
        let (code, _) = emit_one(&dropdown);
        assert!(code.contains("hint_text=\"Select an option\""));
        assert!(code.contains("ft.dropdown.Option(\"Red\")"));
        assert!(code.contains("value=\"Blue\""));
    }

    #[test]
    fn test_unknown_type_is_bare_container() {
        let other = Element::new("x", ElementKind::Other("carousel".into())).with_position(5.0, 5.0);
        let (code, degradations) = emit_one(&other);
        assert_eq!(code, "ft.Container()");
        assert!(matches!(
            &degradations[..],
            [Degradation::UnknownElementType { type_name, .. }] if type_name == "carousel"
        ));
    }
}
