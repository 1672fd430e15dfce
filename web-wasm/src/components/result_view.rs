//! 解析結果表示コンポーネント

use leptos::prelude::*;
use plant_ai_common::{split_property, Line, LineKind, Session};

#[component]
pub fn ResultView<F>(
    session: RwSignal<Session>,
    preview: ReadSignal<Option<String>>,
    file_name: ReadSignal<String>,
    on_ask: F,
) -> impl IntoView
where
    F: Fn(String) + 'static + Clone + Send + Sync,
{
    let lines = move || session.with(|s| s.display_lines());
    let properties = move || session.with(|s| s.fields().properties.clone());
    let keywords = move || session.with(|s| s.fields().keywords.clone());
    let questions = move || session.with(|s| s.fields().questions.clone());
    let is_loading = move || session.with(|s| s.is_loading());

    view! {
        <div class="result-view">
            {move || preview.get().map(|src| view! {
                <figure class="preview">
                    <img src=src alt=move || file_name.get() />
                    <figcaption>{move || file_name.get()}</figcaption>
                </figure>
            })}

            <div class="result-text">
                {move || lines().into_iter().map(render_line).collect_view()}
            </div>

            <Show when=move || !properties().is_empty()>
                <table class="properties">
                    <tbody>
                        {move || properties()
                            .into_iter()
                            .map(|property| {
                                let (key, value) = match split_property(&property) {
                                    Some((key, value)) => (key.to_string(), value.to_string()),
                                    None => (property.clone(), String::new()),
                                };
                                view! {
                                    <tr>
                                        <th>{key}</th>
                                        <td>{value}</td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            </Show>

            <Show when=move || !keywords().is_empty()>
                <div class="keywords">
                    {move || keywords()
                        .into_iter()
                        .map(|keyword| view! { <span class="chip">{keyword}</span> })
                        .collect_view()}
                </div>
            </Show>

            <div class="questions">
                {move || {
                    let on_ask = on_ask.clone();
                    questions()
                        .into_iter()
                        .map(|question| {
                            let on_ask = on_ask.clone();
                            let label = question.clone();
                            view! {
                                <button
                                    class="btn btn-tertiary question"
                                    disabled=is_loading
                                    on:click=move |_| on_ask(question.clone())
                                >
                                    {label}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

fn render_line(line: Line) -> AnyView {
    match line.kind {
        LineKind::Heading => view! { <h3>{line.text}</h3> }.into_any(),
        LineKind::ListItem => view! { <p class="list-item">"• " {line.text}</p> }.into_any(),
        LineKind::Plain => view! { <p>{line.text}</p> }.into_any(),
    }
}
