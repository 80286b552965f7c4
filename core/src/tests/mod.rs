mod lifetime;
