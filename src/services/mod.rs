pub mod whatsapp_service;
