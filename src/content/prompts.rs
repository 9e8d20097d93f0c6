use crate::week::DayOfWeek;

pub const STATION_NAME: &str = "Radio Cartaya 107.2 FM";

/// Facebook copy announcing the 14:00 switch from news to the music block.
pub fn post_text_prompt(day: DayOfWeek) -> String {
    format!(
        "Eres el community manager de {STATION_NAME}. \
         Redacta una publicación creativa para Facebook para el día {day}. \
         Contexto: Son las 14:00, la programación matinal informativa ha terminado y comienza el bloque de programación musical. \
         Debes animar a la audiencia a seguir conectados a la 107.2 FM. \
         Usa muchos emoticonos, un tono dinámico, cercano y profesional. \
         Menciona que la programación detallada está en el primer comentario. \
         Asegúrate de que el texto sea pegajoso y adecuado para compartir en redes sociales de una emisora municipal.",
        day = day.label()
    )
}

/// Studio scene used for every day; `_day` is accepted so the template can
/// vary later without touching callers.
pub fn post_image_prompt(_day: DayOfWeek) -> String {
    format!(
        "A coherent, professional radio broadcasting workstation for '{STATION_NAME}'. \
         In the center, there is an ergonomic broadcaster's chair. \
         A high-end studio microphone on a boom arm is positioned and angled precisely pointing towards the chair's headrest area. \
         A digital sound mixing console with glowing faders is on the desk, oriented for the person sitting in the chair. \
         Professional headphones are resting on the table next to the microphone. \
         The lighting is warm and professional, creating an inviting 'on-air' atmosphere. \
         The composition is realistic and functional, showing a real workspace ready for a host."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_prompt_embeds_day_and_schedule_context() {
        let prompt = post_text_prompt(DayOfWeek::Thursday);
        assert!(prompt.contains("el día Jueves"));
        assert!(prompt.contains("14:00"));
        assert!(prompt.contains(STATION_NAME));
        assert!(prompt.contains("primer comentario"));
    }

    #[test]
    fn image_prompt_is_the_same_for_every_day() {
        let monday = post_image_prompt(DayOfWeek::Monday);
        for day in DayOfWeek::ALL {
            assert_eq!(post_image_prompt(day), monday);
        }
        assert!(monday.contains("microphone"));
    }
}
