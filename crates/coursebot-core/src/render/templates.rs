//! minijinja templates for the widget shell and transcript entries.
//!
//! Message content reaches the templates as already-safe markup, so the
//! environment's autoescaping only applies to attribute values such as the
//! container id and the current input text.

use minijinja::{Environment, Value, context};

use crate::error::Result;
use crate::widget::{ChatMessage, ChatWidget, MenuOption, Sender, Transcript};

/// Fixed DOM ids the widget produces.
pub mod element_ids {
    pub const CONTAINER: &str = "chatbot";
    pub const TOGGLE: &str = "chatbot-toggle";
    pub const WINDOW: &str = "chatbot-window";
    pub const CLOSE: &str = "chatbot-close";
    pub const MESSAGES: &str = "chatbot-messages";
    pub const OPTIONS: &str = "chatbot-options";
    pub const INPUT_AREA: &str = "chatbot-input-area";
    pub const INPUT: &str = "chatbot-input";
    pub const SEND: &str = "chatbot-send";

    /// Every id except the container, in document order.
    pub const ALL: &[&str] = &[
        TOGGLE, WINDOW, CLOSE, MESSAGES, OPTIONS, INPUT_AREA, INPUT, SEND,
    ];
}

const MESSAGE_TEMPLATE_NAME: &str = "message.html";
const WIDGET_TEMPLATE_NAME: &str = "widget.html";

const MESSAGE_TEMPLATE: &str = r#"<div class="mb-2 {% if sender == "user" %}text-right{% else %}text-left{% endif %}">
    <div class="inline-block p-2 rounded-lg {% if sender == "user" %}bg-blue-100{% else %}bg-gray-200{% endif %}">
        {{ content }}
    </div>
</div>"#;

const WIDGET_TEMPLATE: &str = r#"<div id="{{ container_id }}">
<button id="{{ ids.toggle }}" class="bg-blue-500 text-white rounded-full p-3 shadow-lg hover:bg-blue-600 absolute bottom-4 right-4 z-10">
    <svg xmlns="http://www.w3.org/2000/svg" class="h-6 w-6" fill="none" viewBox="0 0 24 24" stroke="currentColor">
        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M8 10h.01M12 10h.01M16 10h.01M9 16H5a2 2 0 01-2-2V6a2 2 0 012-2h14a2 2 0 012 2v8a2 2 0 01-2 2h-5l-5 5v-5z" />
    </svg>
</button>
<div id="{{ ids.window }}" class="{% if not is_open %}hidden {% endif %}absolute inset-4 bg-white z-20 flex flex-col shadow-2xl rounded-lg" style="width: 600px; right: 20px; bottom: 80px; top: auto; left: auto; height: 480px;">
    <div class="bg-blue-500 text-white p-4 rounded-t-lg flex justify-between items-center">
        <h3 class="font-bold text-xl">Chatbot</h3>
        <button id="{{ ids.close }}" class="text-2xl">&times;</button>
    </div>
    <div id="{{ ids.messages }}" class="flex-1 overflow-y-auto p-4" data-scrolled-to="{{ scrolled_to }}">
    {%- for message in messages %}
    {{ message }}
    {%- endfor %}
    </div>
    <div id="{{ ids.options }}" class="p-4 flex justify-center space-x-4{% if not options_visible %} hidden{% endif %}">
    {%- for option in options %}
        <button id="{{ option.id }}" class="{{ option.class }} text-white px-4 py-2 rounded">{{ option.label }}</button>
    {%- endfor %}
    </div>
    <div id="{{ ids.input_area }}" class="p-4 border-t{% if not input_visible %} hidden{% endif %}">
        <div class="flex">
            <input id="{{ ids.input }}" type="text" class="flex-1 border rounded-l-lg p-2" placeholder="Type a message..." value="{{ input_value }}">
            <button id="{{ ids.send }}" class="bg-blue-500 text-white rounded-r-lg px-4 py-2">Send</button>
        </div>
    </div>
</div>
</div>"#;

/// Renders a [`ChatWidget`] to HTML.
pub struct WidgetRenderer {
    env: Environment<'static>,
}

impl WidgetRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(MESSAGE_TEMPLATE_NAME, MESSAGE_TEMPLATE)?;
        env.add_template(WIDGET_TEMPLATE_NAME, WIDGET_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Renders one styled transcript block.
    pub fn render_message(&self, message: &ChatMessage) -> Result<String> {
        let sender = match message.sender {
            Sender::User => "user",
            Sender::Bot => "bot",
        };
        let html = self.env.get_template(MESSAGE_TEMPLATE_NAME)?.render(context! {
            sender => sender,
            content => Value::from_safe_string(message.content.to_string()),
        })?;
        Ok(html)
    }

    /// Renders every transcript block in insertion order.
    pub fn render_transcript(&self, transcript: &Transcript) -> Result<String> {
        let blocks = transcript
            .iter()
            .map(|message| self.render_message(message))
            .collect::<Result<Vec<_>>>()?;
        Ok(blocks.join("\n"))
    }

    /// Renders the whole widget, mounted in `container_id`.
    pub fn render_widget(&self, widget: &ChatWidget, container_id: &str) -> Result<String> {
        let messages = widget
            .transcript()
            .iter()
            .map(|message| self.render_message(message).map(Value::from_safe_string))
            .collect::<Result<Vec<_>>>()?;

        let options: Vec<Value> = <MenuOption as strum::IntoEnumIterator>::iter()
            .map(|option| {
                context! {
                    id => option.element_id(),
                    label => option.to_string(),
                    class => option.button_class(),
                }
            })
            .collect();

        let ids = context! {
            toggle => element_ids::TOGGLE,
            window => element_ids::WINDOW,
            close => element_ids::CLOSE,
            messages => element_ids::MESSAGES,
            options => element_ids::OPTIONS,
            input_area => element_ids::INPUT_AREA,
            input => element_ids::INPUT,
            send => element_ids::SEND,
        };

        let view = widget.view();
        let html = self.env.get_template(WIDGET_TEMPLATE_NAME)?.render(context! {
            container_id => container_id,
            ids => ids,
            is_open => widget.state().is_open,
            options_visible => view.options_visible,
            input_visible => view.input_visible,
            input_value => view.input_value.as_str(),
            scrolled_to => view.scrolled_to,
            messages => messages,
            options => options,
        })?;
        Ok(html)
    }
}
