use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
    Light,
    Dark,
    Ghost,
    Link,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn--primary",
            ButtonVariant::Secondary => "btn--secondary",
            ButtonVariant::Success => "btn--success",
            ButtonVariant::Danger => "btn--danger",
            ButtonVariant::Warning => "btn--warning",
            ButtonVariant::Info => "btn--info",
            ButtonVariant::Light => "btn--light",
            ButtonVariant::Dark => "btn--dark",
            ButtonVariant::Ghost => "btn--ghost",
            ButtonVariant::Link => "btn--link",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl ButtonSize {
    fn class(self) -> &'static str {
        match self {
            ButtonSize::Sm => "btn--sm",
            ButtonSize::Md => "btn--md",
            ButtonSize::Lg => "btn--lg",
            ButtonSize::Xl => "btn--xl",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ButtonProps {
    #[prop_or_default]
    pub variant: ButtonVariant,
    #[prop_or_default]
    pub size: ButtonSize,
    #[prop_or_default]
    pub full_width: bool,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
    #[prop_or_default]
    pub children: Children,
}

/// Styled button primitive. Pure presentation: all behavior comes from
/// the caller through `onclick` and `disabled`.
#[function_component(Button)]
pub fn button(props: &ButtonProps) -> Html {
    let classes = classes!(
        "btn",
        props.variant.class(),
        props.size.class(),
        props.full_width.then_some("btn--full-width"),
        props.class.clone(),
    );

    html! {
        <button class={classes} disabled={props.disabled} onclick={props.onclick.clone()}>
            { for props.children.iter() }
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_classes_are_distinct() {
        let variants = [
            ButtonVariant::Primary,
            ButtonVariant::Secondary,
            ButtonVariant::Success,
            ButtonVariant::Danger,
            ButtonVariant::Warning,
            ButtonVariant::Info,
            ButtonVariant::Light,
            ButtonVariant::Dark,
            ButtonVariant::Ghost,
            ButtonVariant::Link,
        ];
        for variant in variants {
            assert!(variant.class().starts_with("btn--"));
        }
        let mut classes: Vec<_> = variants.iter().map(|v| v.class()).collect();
        classes.sort_unstable();
        classes.dedup();
        assert_eq!(classes.len(), variants.len());
    }

    #[test]
    fn defaults_are_primary_medium() {
        assert_eq!(ButtonVariant::default(), ButtonVariant::Primary);
        assert_eq!(ButtonSize::default(), ButtonSize::Md);
    }
}
