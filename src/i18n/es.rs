pub const BTN_OPEN: &str = "Abrir imagen";
pub const BTN_PREV: &str = "Anterior";
pub const BTN_NEXT: &str = "Siguiente";
pub const BTN_FULLSCREEN: &str = "Pantalla completa";
pub const BTN_ABOUT: &str = "Acerca de";
pub const BTN_CLOSE: &str = "Cerrar";

pub const TEXT_AUTHOR: &str = "Autor: ";
pub const TEXT_LICENSE: &str = "Licencia MIT";
pub const TEXT_INFOAPP: &str = "Carrusel de imágenes con arrastre y transiciones.";
pub const TEXT_OPENIMG: &str = "Abre una imagen para comenzar";
pub const TEXT_ROWSORSPACE: &str = "Usa las flechas, la barra espaciadora o arrastra la imagen para navegar";
pub const TEXT_F11FULLSCREEN: &str = "F11 alterna la pantalla completa";
pub const TEXT_LOADINGIMG: &str = "Cargando imagen...";
pub const TEXT_BROKENIMG: &str = "No se pudo mostrar la imagen";
