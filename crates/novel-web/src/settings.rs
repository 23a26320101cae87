use crate::app::App;
use crate::dom;
use novel_core::{VolumeChannel, VolumeInputs};
use std::rc::Rc;
use web_sys as web;

struct Slider {
    channel: VolumeChannel,
    input: web::HtmlInputElement,
    readout: Option<web::Element>,
}

/// The three range inputs (`{channel}-volume`) and their readouts
/// (`{channel}-volume-value`).
pub struct DomVolumeInputs {
    sliders: Vec<Slider>,
}

impl DomVolumeInputs {
    pub fn from_document(document: &web::Document) -> anyhow::Result<Self> {
        let sliders = VolumeChannel::ALL
            .iter()
            .map(|&channel| {
                let input = dom::element_by_id::<web::HtmlInputElement>(
                    document,
                    &format!("{}-volume", channel.name()),
                )?;
                let readout =
                    document.get_element_by_id(&format!("{}-volume-value", channel.name()));
                Ok(Slider {
                    channel,
                    input,
                    readout,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { sliders })
    }

    fn slider(&self, channel: VolumeChannel) -> Option<&Slider> {
        self.sliders.iter().find(|s| s.channel == channel)
    }

    fn input(&self, channel: VolumeChannel) -> Option<web::HtmlInputElement> {
        self.slider(channel).map(|s| s.input.clone())
    }
}

impl VolumeInputs for DomVolumeInputs {
    fn value(&self, channel: VolumeChannel) -> u8 {
        self.slider(channel)
            .and_then(|s| s.input.value().trim().parse::<f64>().ok())
            .map(|v| v.round().clamp(0.0, 100.0) as u8)
            .unwrap_or(0)
    }

    fn set_value(&mut self, channel: VolumeChannel, percent: u8) {
        if let Some(s) = self.slider(channel) {
            s.input.set_value(&percent.to_string());
        }
    }

    fn set_readout(&mut self, channel: VolumeChannel, text: &str) {
        if let Some(el) = self.slider(channel).and_then(|s| s.readout.as_ref()) {
            el.set_text_content(Some(text));
        }
    }
}

/// Slider `input` events plus the optional reset/mute/unmute/test buttons.
pub fn wire_settings(app: &Rc<App>, document: &web::Document) {
    for channel in VolumeChannel::ALL {
        let Some(input) = app.settings.borrow().inputs().input(channel) else {
            continue;
        };
        let a = app.clone();
        let source = input.clone();
        dom::add_event_listener(&input, "input", move |_ev| {
            let raw = source.value_as_number();
            if raw.is_nan() {
                return;
            }
            a.with_settings(|settings, audio, out| settings.on_input(channel, raw, audio, out));
        });
    }

    let a = app.clone();
    dom::add_click_listener(document, "reset-volume-btn", move || {
        a.with_settings(|settings, audio, out| settings.reset_to_defaults(audio, out));
    });
    let a = app.clone();
    dom::add_click_listener(document, "mute-btn", move || {
        a.with_settings(|settings, audio, out| settings.mute_all(audio, out));
    });
    let a = app.clone();
    dom::add_click_listener(document, "unmute-btn", move || {
        a.with_settings(|settings, audio, out| settings.unmute_all(audio, out));
    });
    let a = app.clone();
    dom::add_click_listener(document, "test-sfx-btn", move || {
        a.with_settings(|settings, audio, out| {
            settings.test_sound_effect(audio, out);
        });
    });
}
